// conlang-clusters: Rebuild and print the phoneme cluster table.
//
// Extracts clusters from the whole lexicon (including temporary declined
// and derived forms) and prints them grouped by shape:
//   cluster<TAB>shape
//
// Usage:
//   conlang-clusters [-l LANGUAGE] [OPTIONS]
//
// Options:
//   -l, --language PATH    Language description (JSON)
//   --any-notation         Also rebuild for languages not written in IPA
//   --json                 Print the updated language description instead
//   -h, --help             Print help

use std::io::{self, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (language_path, args) = conlang_cli::parse_language_path(&args);

    if conlang_cli::wants_help(&args) {
        println!("conlang-clusters: Rebuild and print the phoneme cluster table.");
        println!();
        println!("Usage: conlang-clusters [-l LANGUAGE] [OPTIONS]");
        println!();
        println!("Options:");
        println!("  -l, --language PATH    Language description (JSON)");
        println!("  --any-notation         Also rebuild for languages not written in IPA");
        println!("  --json                 Print the updated language description instead");
        println!("  -h, --help             Print this help");
        return;
    }

    let any_notation = args.iter().any(|a| a == "--any-notation");
    let as_json = args.iter().any(|a| a == "--json");

    let mut lang = conlang_cli::load_language(language_path.as_deref())
        .unwrap_or_else(|e| conlang_cli::fatal(&e));
    if any_notation {
        lang.set_ipa_only_clusters(false);
    } else if !lang.description().is_ipa() {
        eprintln!(
            "warning: language notation is `{}`, not ipa; cluster table left unchanged",
            lang.description().phonetic_characters
        );
    }

    lang.rebuild_phoneme_clusters()
        .unwrap_or_else(|e| conlang_cli::fatal(&e.to_string()));

    if as_json {
        let json = conlang_cli::to_json(lang.description()).unwrap_or_else(|e| conlang_cli::fatal(&e));
        println!("{json}");
        return;
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for (cluster, shape) in lang.phoneme_clusters().sorted() {
        let _ = writeln!(out, "{cluster}\t{shape}");
    }
}
