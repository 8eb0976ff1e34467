use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SPLIT: Regex = Regex::new(r"[\s,]+").expect("valid regex");
}

/// Tokenization boundary consumed by the index. Implementations must be
/// deterministic and total: any input string, including the empty one,
/// yields a token sequence.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Default tokenizer: splits on runs of whitespace and commas.
///
/// Leading or trailing delimiters produce an empty token at that edge, and
/// an empty input yields a single empty token. These artifacts are part of
/// the contract (term counts must line up across corpora indexed with this
/// splitter); callers who want them filtered plug in their own [`Tokenizer`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DelimiterTokenizer;

impl Tokenizer for DelimiterTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text)
    }
}

/// Adapter turning a plain function or closure into a [`Tokenizer`].
pub struct FnTokenizer<F>(pub F);

impl<F> Tokenizer for FnTokenizer<F>
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Vec<String> {
        (self.0)(text)
    }
}

/// Split `text` on runs of whitespace and/or commas.
pub fn tokenize(text: &str) -> Vec<String> {
    SPLIT.split(text).map(str::to_owned).collect()
}
