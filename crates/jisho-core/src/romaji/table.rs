use std::collections::HashMap;
use std::sync::OnceLock;

/// Romaji syllable to kana; doubled consonants are listed as whole syllables
#[rustfmt::skip]
const MAPPINGS: &[(&str, &str)] = &[
    // Vowels
    ("a", "あ"), ("i", "い"), ("u", "う"), ("e", "え"), ("o", "お"),
    // Basic syllables
    ("ka", "か"), ("ki", "き"), ("ku", "く"), ("ke", "け"), ("ko", "こ"),
    ("sa", "さ"), ("shi", "し"), ("su", "す"), ("se", "せ"), ("so", "そ"),
    ("ta", "た"), ("chi", "ち"), ("tsu", "つ"), ("te", "て"), ("to", "と"),
    ("na", "な"), ("ni", "に"), ("nu", "ぬ"), ("ne", "ね"), ("no", "の"),
    ("ha", "は"), ("hi", "ひ"), ("fu", "ふ"), ("he", "へ"), ("ho", "ほ"),
    ("ma", "ま"), ("mi", "み"), ("mu", "む"), ("me", "め"), ("mo", "も"),
    ("ya", "や"), ("yu", "ゆ"), ("yo", "よ"),
    ("ra", "ら"), ("ri", "り"), ("ru", "る"), ("re", "れ"), ("ro", "ろ"),
    ("wa", "わ"), ("wo", "を"), ("n", "ん"),
    // Voiced
    ("ga", "が"), ("gi", "ぎ"), ("gu", "ぐ"), ("ge", "げ"), ("go", "ご"),
    ("za", "ざ"), ("ji", "じ"), ("zu", "ず"), ("ze", "ぜ"), ("zo", "ぞ"),
    ("da", "だ"), ("di", "ぢ"), ("du", "づ"), ("de", "で"), ("do", "ど"),
    ("ba", "ば"), ("bi", "び"), ("bu", "ぶ"), ("be", "べ"), ("bo", "ぼ"),
    ("pa", "ぱ"), ("pi", "ぴ"), ("pu", "ぷ"), ("pe", "ぺ"), ("po", "ぽ"),
    // Contracted
    ("kya", "きゃ"), ("kyu", "きゅ"), ("kyo", "きょ"),
    ("sha", "しゃ"), ("shu", "しゅ"), ("sho", "しょ"),
    ("cha", "ちゃ"), ("chu", "ちゅ"), ("cho", "ちょ"),
    ("nya", "にゃ"), ("nyu", "にゅ"), ("nyo", "にょ"),
    ("hya", "ひゃ"), ("hyu", "ひゅ"), ("hyo", "ひょ"),
    ("mya", "みゃ"), ("myu", "みゅ"), ("myo", "みょ"),
    ("rya", "りゃ"), ("ryu", "りゅ"), ("ryo", "りょ"),
    ("gya", "ぎゃ"), ("gyu", "ぎゅ"), ("gyo", "ぎょ"),
    ("ja", "じゃ"), ("ju", "じゅ"), ("jo", "じょ"),
    ("bya", "びゃ"), ("byu", "びゅ"), ("byo", "びょ"),
    ("pya", "ぴゃ"), ("pyu", "ぴゅ"), ("pyo", "ぴょ"),
    // Geminates
    ("kka", "っか"), ("kke", "っけ"), ("kki", "っき"), ("kko", "っこ"), ("kku", "っく"),
    ("ssa", "っさ"), ("sse", "っせ"), ("sshi", "っし"), ("sso", "っそ"), ("ssu", "っす"),
    ("tta", "った"), ("tte", "って"), ("tti", "っち"), ("tto", "っと"), ("ttu", "っつ"),
    ("ppa", "っぱ"), ("ppe", "っぺ"), ("ppi", "っぴ"), ("ppo", "っぽ"), ("ppu", "っぷ"),
    ("ssha", "っしゃ"), ("sshu", "っしゅ"), ("ssho", "っしょ"),
    // Long vowels
    ("aa", "あー"), ("ii", "いー"), ("uu", "うー"), ("ee", "えー"), ("oo", "おー"),
];

struct Node {
    children: HashMap<u8, Node>,
    kana: Option<&'static str>,
}

impl Node {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            kana: None,
        }
    }
}

/// Byte trie over the romaji syllables, shared read-only by the whole process
pub struct RomajiTable {
    root: Node,
}

impl RomajiTable {
    /// Get or initialize the global table
    pub fn global() -> &'static RomajiTable {
        static INSTANCE: OnceLock<RomajiTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let mut table = RomajiTable { root: Node::new() };
            for &(romaji, kana) in MAPPINGS {
                table.insert(romaji, kana);
            }
            table
        })
    }

    /// Longest syllable that prefixes `input`, as (byte length, kana)
    pub fn longest_match(&self, input: &str) -> Option<(usize, &'static str)> {
        let mut node = &self.root;
        let mut best = None;

        for (depth, b) in input.bytes().enumerate() {
            match node.children.get(&b) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(kana) = node.kana {
                best = Some((depth + 1, kana));
            }
        }

        best
    }

    /// Exact syllable lookup
    #[cfg(test)]
    fn get(&self, romaji: &str) -> Option<&'static str> {
        self.longest_match(romaji)
            .filter(|&(len, _)| len == romaji.len())
            .map(|(_, kana)| kana)
    }

    fn insert(&mut self, romaji: &str, kana: &'static str) {
        let mut node = &mut self.root;
        for b in romaji.bytes() {
            node = node.children.entry(b).or_insert_with(Node::new);
        }
        node.kana = Some(kana);
    }
}
