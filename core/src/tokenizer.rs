use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Term extraction policy. A corpus and every query run against it use the same policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tokenizer {
    /// Lower-case, split on whitespace, keep every fragment.
    #[default]
    Whitespace,
    /// NFKC, lower-case, letter-led words of two or more chars, English stop words removed.
    Words,
}

impl Tokenizer {
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        match self {
            Tokenizer::Whitespace => tokenize(text),
            Tokenizer::Words => tokenize_words(text),
        }
    }
}

impl FromStr for Tokenizer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whitespace" => Ok(Tokenizer::Whitespace),
            "words" => Ok(Tokenizer::Words),
            other => Err(format!("unknown tokenizer '{other}' (expected 'whitespace' or 'words')")),
        }
    }
}

impl fmt::Display for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tokenizer::Whitespace => f.write_str("whitespace"),
            Tokenizer::Words => f.write_str("words"),
        }
    }
}

/// Lower-case the text and split it on whitespace. Punctuation stays attached to its fragment.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase().split_whitespace().map(str::to_string).collect()
}

/// Word tokenization with NFKC normalization and stopword removal, no stemming.
pub fn tokenize_words(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    RE.find_iter(&normalized)
        .map(|m| m.as_str())
        .filter(|t| t.chars().count() >= 2 && !is_stopword(t))
        .map(str::to_string)
        .collect()
}
