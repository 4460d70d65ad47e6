// IPA to Kirshenbaum transliteration
//
// Kirshenbaum is the ASCII phonetic notation eSpeak NG accepts inside
// `[[...]]` brackets. Every symbol maps from a single IPA code point.

use conlang_core::{ConlangError, Result};

/// IPA code point to Kirshenbaum symbol.
#[rustfmt::skip]
const IPA_TO_KIRSHENBAUM: &[(char, &str)] = &[
    ('a', "a"), ('b', "b"), ('ɓ', "b`"), ('c', "c"), ('d', "d"), ('ɖ', "d."),
    ('ɗ', "d`"), ('e', "e"), ('f', "f"), ('ɡ', "g"), ('ɠ', "g`"), ('h', "h"),
    ('ɦ', "h<?>"), ('i', "i"), ('j', "j"), ('k', "k"), ('l', "l"),
    ('ɭ', "l."), ('ɺ', "*<lat>"), ('m', "m"), ('n', "n"), ('ɳ', "n."), ('o', "o"),
    ('p', "p"), ('ɸ', "P"), ('q', "q"), ('r', "r<trl>"), ('ɽ', "r."), ('ɹ', "r"),
    ('ɻ', "r."), ('s', "s"), ('t', "t"), ('ʈ', "t."),
    ('u', "u"), ('v', "v"), ('ʋ', "r<lbd>"), ('w', "w"), ('x', "x"),
    ('y', "y"), ('z', "z"), ('ʐ', "z."), ('ɑ', "A"), ('β', "B"),
    ('B', "b<trl>"), ('ç', "C"), ('ð', "D"), ('ɛ', "E"), ('ɱ', "M"), ('ɣ', "Q"),
    ('ɢ', "G"), ('ʜ', "H"), ('ɪ', "I"),
    ('ɲ', "n^"), ('ɟ', "J"), ('ɬ', "s<lat>"), ('ɮ', "z<lat>"), ('ʎ', "l["),
    ('ʟ', "L"), ('ɯ', "u-"), ('ɰ', "j<vel>"), ('ŋ', "N"), ('ɴ', "n\""), ('ɔ', "o-"),
    ('ʁ', "g\""), ('ʀ', "r\""), ('ʃ', "S"), ('θ', "T"),
    ('ʊ', "U"), ('ʌ', "V"), ('ʍ', "w<vls>"), ('χ', "g\""), ('ħ', "X"),
    ('ʏ', "I."), ('ʒ', "Z"), ('ˈ', "'"), ('ˌ', ","),
    ('ː', "{lng}"), ('ə', "@"), ('ɘ', "@<umd>"), ('æ', "&"),
    ('ʉ', "u\""), ('ɨ', "i\""), ('ø', "Y"), ('ɜ', "V\""), ('ɞ', "O\""), ('ɾ', "*"),
    ('ɫ', "l~"), ('ɤ', "o-"), ('œ', "Y"), ('ɶ', "a."),
    ('ʔ', "?"), ('ʕ', "H<vcd>"),
    ('ǃ', "!"), ('\u{0308}', "\""), ('\u{0329}', "`"), ('\u{02BC}', "`"), ('\u{02DE}', "<r>"),
    ('\u{0303}', "~"), ('\u{032A}', "["), ('\u{02E0}', "~"), ('\u{02B0}', "<h>"), ('\u{031E}', "_o"),
    ('\u{0324}', "<?>"), ('ʝ', "Z"), ('ʂ', "s."), ('ɕ', "s;"), ('ɧ', "z;"), ('ʑ', "z;"),
    ('ɥ', "r<lbd>"), ('ʄ', "J`"), ('ʘ', "!"), ('ɒ', "A."), ('ɚ', "@<r>"), ('ɐ', "V\""),
    ('ɵ', "@."), ('ǀ', "!["), ('‖', "!"), ('ǂ', "!"),
];

/// IPA symbols with no Kirshenbaum equivalent. They are dropped from the
/// output instead of failing the conversion.
#[rustfmt::skip]
pub const UNMAPPED_PHONEMES: &[char] = &[
    'ʛ', 'ᵻ', 'ᵿ', '.', 'ʲ', 'ˑ', 'ʢ', 'ʡ', 'ꜛ', 'ꜜ', '|', 'ǁ', '‿',
    '\u{031F}', '\u{0320}', '\u{030C}', '\u{0325}', '\u{0E24}', '\u{0302}', '\u{032F}',
    '\u{031A}', '\u{0318}', '\u{033A}', '\u{031C}', '\u{033B}', '\u{033C}', '\u{0339}',
    '\u{0319}', '\u{0330}', '\u{031D}', '\u{02B7}',
];

/// Kirshenbaum symbol for one IPA code point.
pub fn kirshenbaum_symbol(c: char) -> Option<&'static str> {
    IPA_TO_KIRSHENBAUM
        .iter()
        .find(|(ipa, _)| *ipa == c)
        .map(|(_, k)| *k)
}

/// Convert one IPA word to bracketed Kirshenbaum, e.g. `ˈkata` to
/// `[['kata]]`.
///
/// Symbols in [`UNMAPPED_PHONEMES`] are skipped. Any other symbol without
/// a mapping fails with [`ConlangError::MissingMapping`].
pub fn ipa_to_kirshenbaum(word: &str) -> Result<String> {
    let mut out = String::with_capacity(word.len() + 4);
    out.push_str("[[");
    for c in word.chars() {
        if UNMAPPED_PHONEMES.contains(&c) {
            continue;
        }
        let symbol = kirshenbaum_symbol(c).ok_or_else(|| ConlangError::MissingMapping {
            phoneme: c.to_string(),
            word: word.to_string(),
        })?;
        out.push_str(symbol);
    }
    out.push_str("]]");
    Ok(out)
}
