// conlang-sort: Sort a lexicon by the language's alphabet or by gloss.
//
// Prints one entry per line:
//   spelled<TAB>phonetic<TAB>english
//
// Usage:
//   conlang-sort [-l LANGUAGE] [OPTIONS]
//
// Options:
//   -l, --language PATH    Language description (JSON)
//   -e, --english          Sort by English gloss instead of spelling
//   --keys                 Also print each entry's collation key
//   --json                 Print the sorted language description instead
//   -h, --help             Print help

use std::io::{self, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (language_path, args) = conlang_cli::parse_language_path(&args);

    if conlang_cli::wants_help(&args) {
        println!("conlang-sort: Sort a lexicon by the language's alphabet or by gloss.");
        println!();
        println!("Usage: conlang-sort [-l LANGUAGE] [OPTIONS]");
        println!();
        println!("Options:");
        println!("  -l, --language PATH    Language description (JSON)");
        println!("  -e, --english          Sort by English gloss instead of spelling");
        println!("  --keys                 Also print each entry's collation key");
        println!("  --json                 Print the sorted language description instead");
        println!("  -h, --help             Print this help");
        return;
    }

    let by_english = args.iter().any(|a| a == "-e" || a == "--english");
    let show_keys = args.iter().any(|a| a == "--keys");
    let as_json = args.iter().any(|a| a == "--json");

    let mut lang = conlang_cli::load_language(language_path.as_deref())
        .unwrap_or_else(|e| conlang_cli::fatal(&e));

    if by_english {
        lang.sort_lexicon_by_english();
    } else {
        lang.sort_lexicon_by_spelling();
    }

    if as_json {
        let json = conlang_cli::to_json(lang.description()).unwrap_or_else(|e| conlang_cli::fatal(&e));
        println!("{json}");
        return;
    }

    let collator = lang.collator();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for entry in lang.lexicon() {
        if show_keys {
            let _ = writeln!(
                out,
                "{}\t{}\t{}\t{}",
                entry.spelled,
                entry.phonetic,
                entry.english,
                collator.key(&entry.spelled)
            );
        } else {
            let _ = writeln!(out, "{}\t{}\t{}", entry.spelled, entry.phonetic, entry.english);
        }
    }
}
