// conlang-spell: Convert between pronunciation and spelling.
//
// Reads words from the command line or stdin (one per line) and prints each
// word with its converted form, separated by a tab.
//
// Usage:
//   conlang-spell [-l LANGUAGE] [OPTIONS] [WORD...]
//
// Options:
//   -l, --language PATH    Language description (JSON)
//   -r, --reverse          Sound out spelled words instead of spelling
//   -k, --kirshenbaum      Print phonetic words in Kirshenbaum notation
//   -h, --help             Print help

use std::io::{self, BufRead, Write};

use conlang_phonology::Language;

#[derive(Clone, Copy)]
enum Mode {
    Spell,
    SoundOut,
    Kirshenbaum,
}

fn convert(lang: &Language, mode: Mode, word: &str) -> String {
    match mode {
        Mode::Spell => lang.spell(word),
        Mode::SoundOut => lang.sound_out(word),
        Mode::Kirshenbaum => lang
            .kirshenbaum(word)
            .unwrap_or_else(|e| format!("<{e}>")),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (language_path, args) = conlang_cli::parse_language_path(&args);

    if conlang_cli::wants_help(&args) {
        println!("conlang-spell: Convert between pronunciation and spelling.");
        println!();
        println!("Usage: conlang-spell [-l LANGUAGE] [OPTIONS] [WORD...]");
        println!();
        println!("If WORD arguments are given, converts each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -l, --language PATH    Language description (JSON)");
        println!("  -r, --reverse          Sound out spelled words instead of spelling");
        println!("  -k, --kirshenbaum      Print phonetic words in Kirshenbaum notation");
        println!("  -h, --help             Print this help");
        return;
    }

    let mut mode = Mode::Spell;
    let mut words: Vec<String> = Vec::new();
    for arg in &args {
        match arg.as_str() {
            "-r" | "--reverse" => mode = Mode::SoundOut,
            "-k" | "--kirshenbaum" => mode = Mode::Kirshenbaum,
            s if !s.starts_with('-') => words.push(arg.clone()),
            s => conlang_cli::fatal(&format!("unknown option {s}")),
        }
    }

    let lang = conlang_cli::load_language(language_path.as_deref())
        .unwrap_or_else(|e| conlang_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if words.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            let _ = writeln!(out, "{word}\t{}", convert(&lang, mode, word));
        }
    } else {
        for word in &words {
            let _ = writeln!(out, "{word}\t{}", convert(&lang, mode, word));
        }
    }
}
