//! Line-oriented text normalization for raw subtitle-style input
//!
//! Strips quotation and punctuation noise before any scoring: stray
//! quotes, unicode punctuation variants, broken apostrophes, spacing
//! around brackets and sentence punctuation, and subtitle artifacts such
//! as leading dashes and trailing cue numbers. Rules apply in a fixed
//! order; the output is the sentence every downstream component sees.

use regex::Regex;

/// Compiled normalization rule set.
///
/// All regexes are compiled once in the constructor and reused for every
/// line of the run.
pub struct Normalizer {
    lone_quote: Regex,
    rules: Vec<(Regex, &'static str)>,
}

impl Normalizer {
    pub fn new() -> Self {
        let rule = |pattern: &str, replacement: &'static str| {
            (Regex::new(pattern).expect("normalizer rule"), replacement)
        };

        let rules = vec![
            // Rejoin apostrophes detached by tokenized sources: "don' t"
            rule(
                r"([a-zA-ZÜĞİŞÇüğışçöÖ])' *([a-zA-ZÜĞİŞÇüğışçöÖ])",
                "$1'$2",
            ),
            // Re-space brackets, then repair the punctuation around them
            rule(r"\(", " ("),
            rule(r"\)", ") "),
            rule(r" +", " "),
            rule(r"\) ([.!:?;,])", ")$1"),
            rule(r"\( ", "("),
            rule(r" \)", ")"),
            rule(r"(\d) %", "$1%"),
            rule(r"% (\d)", "%$1"),
            // Fold unicode punctuation to ASCII
            rule("„", "\""),
            rule("“", "\""),
            rule("”", "\""),
            rule("–", "-"),
            rule("—", " - "),
            rule(r" +", " "),
            rule("´", "'"),
            rule(
                "([a-zA-ZÜĞİŞÇüğışçöÖ])‘([a-zA-ZÜĞİŞÇüğışçöÖ])",
                "$1'$2",
            ),
            rule(
                "([a-zA-ZÜĞİŞÇüğışçöÖ])’([a-zA-ZÜĞİŞÇüğışçöÖ])",
                "$1'$2",
            ),
            rule("‘", ""),
            rule("‚", ""),
            rule("’", ""),
            rule("''", "\""),
            rule("…", "..."),
            // French quotes
            rule(" « ", " \""),
            rule("« ", "\""),
            rule("«", "\""),
            rule(" » ", "\" "),
            rule(" »", "\""),
            rule("»", "\""),
            // Pseudo-spaces before sentence punctuation
            rule("nº ", ""),
            rule(" :", ":"),
            rule(r" \?", "?"),
            rule(" !", "!"),
            rule(" ;", ";"),
            rule(r" \.", "."),
            rule(" ,", ","),
            // Subtitle artifacts
            rule(r" \[ Getty Images \]$", ""),
            rule(r"\.([A-ZÜĞİŞÇÖ])", ". $1"),
            rule(r";([A-Za-züğışçöÜĞİŞÇÖ])", "; $1"),
            rule(r",([A-Za-züğışçöÜĞİŞÇÖ])", ", $1"),
            rule(r"\?([A-Za-züğışçöÜĞİŞÇÖ])", "? $1"),
            rule(r"!([A-Za-züğışçöÜĞİŞÇÖ])", "! $1"),
            rule(r"\.\.+ *\.\.+", " "),
            rule(r"^ *-", ""),
            rule(r"\. *[\[({]?\d*[)\]}]?$", "."),
            rule(r"^ *\t* *", ""),
        ];

        Self {
            lone_quote: Regex::new(r#"^[^"]*"[^"]*$"#).expect("lone quote regex"),
            rules,
        }
    }

    /// Normalize one raw input line.
    pub fn normalize(&self, line: &str) -> String {
        let mut sentence = line.to_string();

        // A line carrying exactly one double quote is an unbalanced
        // artifact; drop the quote entirely.
        if self.lone_quote.is_match(&sentence) {
            sentence = sentence.replace('"', "");
        }

        for (regex, replacement) in &self.rules {
            sentence = regex.replace_all(&sentence, *replacement).into_owned();
        }

        sentence.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
