use analysis_core::{Headline, HeadlineScorer, SentimentRow, SentimentTable};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

const NEGATION_WORDS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "isn't", "aren't",
    "wasn't", "weren't", "won't", "wouldn't", "couldn't", "shouldn't", "hardly",
    "barely", "neither", "nor", "without",
];

const NEGATION_WINDOW: usize = 3;

/// Normalization constant that maps an unbounded raw score into (-1, 1).
const NORMALIZATION_ALPHA: f64 = 15.0;

const POSITIVE_WORDS: &[&str] = &[
    "bullish", "rally", "surge", "gain", "gains", "profit", "growth", "beat",
    "beats", "upgrade", "outperform", "strong", "positive", "rise", "increase",
    "breakthrough", "innovation", "success", "exceed", "exceeds", "momentum",
    "optimistic", "record", "advance",
    // Financial-specific terms
    "dividend", "buyback", "repurchase", "accretive", "upside",
    "recovery", "rebound", "expansion", "robust", "accelerating",
    "overweight", "raised", "upgraded", "outpacing", "tailwind",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bearish", "decline", "loss", "losses", "fall", "plunge", "crash", "miss",
    "misses", "downgrade", "underperform", "weak", "negative", "drop", "decrease",
    "concern", "concerns", "risk", "fail", "disappoint", "disappoints", "slump",
    "warning", "pessimistic", "retreat", "fear", "trouble",
    // Financial-specific terms
    "dilution", "dilutive", "headwind", "lawsuit", "litigation",
    "recall", "investigation", "probe", "default", "bankruptcy",
    "restructuring", "layoff", "layoffs", "downside", "overvalued", "bubble",
    "underweight", "lowered", "suspended",
];

static SHARED_SCORER: Lazy<LexiconScorer> = Lazy::new(|| {
    tracing::debug!("initializing shared lexicon scorer");
    LexiconScorer::new()
});

/// Process-wide scorer, built on first use.
pub fn shared_scorer() -> &'static LexiconScorer {
    &SHARED_SCORER
}

/// Word-list headline scorer with a short negation window.
pub struct LexiconScorer {
    /// Word -> +1 or -1.
    polarity: HashMap<&'static str, i32>,
    negators: HashSet<&'static str>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        let polarity = POSITIVE_WORDS
            .iter()
            .map(|w| (*w, 1))
            .chain(NEGATIVE_WORDS.iter().map(|w| (*w, -1)))
            .collect();
        Self {
            polarity,
            negators: NEGATION_WORDS.iter().copied().collect(),
        }
    }

    /// Sum of word polarities in one left-to-right pass. A negator flips
    /// every polar word among the next `NEGATION_WINDOW` tokens.
    fn raw_score(&self, text: &str) -> i32 {
        let lowered = text.to_lowercase();
        let tokens = lowered
            .split(|c: char| c.is_whitespace() || ",;.!?:\"()".contains(c))
            .filter(|t| !t.is_empty());

        let mut flip_for = 0usize;
        let mut total = 0;
        for token in tokens {
            if self.negators.contains(token) {
                flip_for = NEGATION_WINDOW;
                continue;
            }
            if let Some(&weight) = self.polarity.get(token) {
                total += if flip_for > 0 { -weight } else { weight };
            }
            flip_for = flip_for.saturating_sub(1);
        }
        total
    }

    /// Squash a raw score into [-1, 1] the way compound polarity is reported.
    fn normalize(raw: f64) -> f64 {
        if raw == 0.0 {
            return 0.0;
        }
        (raw / (raw * raw + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}

impl HeadlineScorer for LexiconScorer {
    fn compound(&self, headline: &str) -> f64 {
        if headline.trim().is_empty() {
            return 0.0;
        }
        Self::normalize(f64::from(self.raw_score(headline)))
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Score every headline and return a sentiment table sorted by date.
///
/// Headlines without a date sort last, keeping their relative order.
pub fn score_headlines(headlines: &[Headline], scorer: &dyn HeadlineScorer) -> SentimentTable {
    let mut rows: Vec<SentimentRow> = headlines
        .iter()
        .map(|h| SentimentRow {
            date: h.date,
            source: h.source.clone(),
            headline: h.headline.clone(),
            compound: Some(scorer.compound(&h.headline)),
        })
        .collect();
    rows.sort_by_key(|r| (r.date.is_none(), r.date));

    tracing::debug!(headlines = rows.len(), "scored headlines");
    SentimentTable::from_rows(rows)
}
