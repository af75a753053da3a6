use crate::error::NormalizeError;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref APOSTROPHE_REGEX: Regex = Regex::new(r"['\x{2019}]").unwrap();
    static ref DELIMITER_REGEX: Regex = Regex::new(r"[^\p{L}\p{N}]+").unwrap();
}

/// A pure function turning one key into its cased form
pub trait Casing {
    fn convert(&self, input: &str) -> String;
}

impl<F> Casing for F
where
    F: Fn(&str) -> String,
{
    fn convert(&self, input: &str) -> String { self(input) }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum KeyCase {
    /// `blog-posts` => `blogPosts`
    Camel,
    /// `blog-posts` => `BlogPosts`
    Pascal,
    /// `blogPosts` => `blog_posts`
    Snake,
    /// `blogPosts` => `blog-posts`
    Kebab,
    /// Keys are kept as they are
    Preserve,
}

impl Default for KeyCase {
    fn default() -> Self { KeyCase::Camel }
}

impl Casing for KeyCase {
    fn convert(&self, input: &str) -> String {
        match self {
            KeyCase::Camel => words(input)
                .iter()
                .enumerate()
                .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
                .collect(),
            KeyCase::Pascal => words(input).iter().map(|w| capitalize(w)).collect(),
            KeyCase::Snake => join_lowercase(input, "_"),
            KeyCase::Kebab => join_lowercase(input, "-"),
            KeyCase::Preserve => input.to_string(),
        }
    }
}

impl fmt::Display for KeyCase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            KeyCase::Camel => "camel",
            KeyCase::Pascal => "pascal",
            KeyCase::Snake => "snake",
            KeyCase::Kebab => "kebab",
            KeyCase::Preserve => "preserve",
        };
        f.write_str(name)
    }
}

impl FromStr for KeyCase {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camel" => Ok(KeyCase::Camel),
            "pascal" => Ok(KeyCase::Pascal),
            "snake" => Ok(KeyCase::Snake),
            "kebab" => Ok(KeyCase::Kebab),
            "preserve" => Ok(KeyCase::Preserve),
            _ => Err(NormalizeError::UnknownKeyCase(s.into())),
        }
    }
}

impl Serialize for KeyCase {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for KeyCase {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Splits `input` into the words the case conversions are built from.
///
/// Apostrophes are dropped first: `don't-stop` => `dont`, `stop`. Then any run of characters which
/// are neither letters nor numbers delimits two words. Inside a run, a new word starts:
///   1. at a lowercase to uppercase transition: `blogPost` => `blog`, `Post`
///   2. before the last capital of an acronym followed by a lowercase letter: `XMLHttp` => `XML`, `Http`
///   3. at a letter to digit transition and back: `v2beta` => `v`, `2`, `beta`,
///      except for ordinals ending a word: `1st-place` => `1st`, `place`
///
/// Letters are never deburred: `éclair-au` => `éclair`, `au`.
pub fn words(input: &str) -> Vec<String> {
    let input = APOSTROPHE_REGEX.replace_all(input, "");
    DELIMITER_REGEX
        .split(&input)
        .filter(|s| !s.is_empty())
        .flat_map(split_segment)
        .collect()
}

fn split_segment(segment: &str) -> Vec<String> {
    let chars: Vec<char> = segment.chars().collect();
    let mut words = Vec::new();
    let mut start = 0;

    for i in 1 .. chars.len() {
        let (prev, cur) = (chars[i - 1], chars[i]);
        let next_is_lower = chars.get(i + 1).map_or(false, |c| c.is_lowercase());
        let is_boundary = (prev.is_lowercase() && cur.is_uppercase())
            || (prev.is_uppercase() && cur.is_uppercase() && next_is_lower)
            || (prev.is_numeric() != cur.is_numeric() && !is_ordinal_suffix(&chars, i));
        if is_boundary {
            words.push(chars[start .. i].iter().collect());
            start = i;
        }
    }
    if start < chars.len() {
        words.push(chars[start ..].iter().collect());
    }

    words
}

/// `chars[at ..]` starts the `st`, `nd`, `rd` or `th` of an ordinal and the word ends after it
fn is_ordinal_suffix(chars: &[char], at: usize) -> bool {
    let suffix = match chars[at - 1] {
        '1' => "st",
        '2' => "nd",
        '3' => "rd",
        c if c.is_ascii_digit() => "th",
        _ => return false,
    };
    let found: String = chars[at ..].iter().take(2).collect();
    found.to_lowercase() == suffix && chars.get(at + 2).map_or(true, |c| c.is_uppercase())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let tail = chars.as_str().to_lowercase();
            first.to_uppercase().chain(tail.chars()).collect()
        },
        None => String::new(),
    }
}

fn join_lowercase(input: &str, separator: &str) -> String {
    words(input).iter().map(|w| w.to_lowercase()).collect::<Vec<_>>().join(separator)
}

/// Converts the top-level keys of `map`, values are moved over untouched.
/// When two keys collide after the conversion, the later one wins.
pub fn convert_keys<C: Casing + ?Sized>(map: Map<String, Value>, casing: &C) -> Map<String, Value> {
    map.into_iter().map(|(k, v)| (casing.convert(&k), v)).collect()
}

/// Converts the keys of every object nested in `value`
pub fn deep_convert_keys<C: Casing + ?Sized>(value: Value, casing: &C) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (casing.convert(&k), deep_convert_keys(v, casing)))
                .collect(),
        ),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| deep_convert_keys(v, casing)).collect())
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use crate::case::{words, Casing, KeyCase};

    #[test]
    fn words_test() {
        assert_eq!(words("blog-posts"), vec!["blog", "posts"]);
        assert_eq!(words("created_at"), vec!["created", "at"]);
        assert_eq!(words("  Foo  Bar "), vec!["Foo", "Bar"]);
        assert_eq!(words("blogPost"), vec!["blog", "Post"]);
        assert_eq!(words("XMLHttpRequest"), vec!["XML", "Http", "Request"]);
        assert_eq!(words("foo2bar"), vec!["foo", "2", "bar"]);
        assert_eq!(words("__--"), Vec::<String>::new());
        assert_eq!(words(""), Vec::<String>::new());
    }

    #[test]
    fn apostrophes_are_dropped_test() {
        assert_eq!(words("don't-stop"), vec!["dont", "stop"]);
        assert_eq!(words("it\u{2019}s"), vec!["its"]);
        assert_eq!(KeyCase::Camel.convert("don't-stop"), "dontStop");
    }

    #[test]
    fn ordinals_stay_whole_test() {
        assert_eq!(words("1st-place"), vec!["1st", "place"]);
        assert_eq!(words("22ndFloor"), vec!["22nd", "Floor"]);
        assert_eq!(words("4th"), vec!["4th"]);
        assert_eq!(words("1stly"), vec!["1", "stly"]);
        assert_eq!(words("2st"), vec!["2", "st"]);
        assert_eq!(KeyCase::Camel.convert("1st-place"), "1stPlace");
        assert_eq!(KeyCase::Camel.convert("my-3rd-try"), "my3rdTry");
    }

    #[test]
    fn unicode_words_test() {
        assert_eq!(words("größe-maß"), vec!["größe", "maß"]);
        assert_eq!(words("éclairAu-chocolat"), vec!["éclair", "Au", "chocolat"]);
    }

    #[test]
    fn key_case_parse_test() {
        assert_eq!("camel".parse::<KeyCase>().unwrap(), KeyCase::Camel);
        assert_eq!("kebab".parse::<KeyCase>().unwrap(), KeyCase::Kebab);
        assert!("Camel".parse::<KeyCase>().is_err());
        assert!("title".parse::<KeyCase>().is_err());

        for case in &[KeyCase::Camel, KeyCase::Pascal, KeyCase::Snake, KeyCase::Kebab, KeyCase::Preserve] {
            assert_eq!(case.to_string().parse::<KeyCase>().unwrap(), *case);
        }
    }

    #[test]
    fn capitalize_lowercases_the_tail_test() {
        assert_eq!(KeyCase::Camel.convert("FOO_BAR"), "fooBar");
        assert_eq!(KeyCase::Pascal.convert("FOO_BAR"), "FooBar");
    }
}
