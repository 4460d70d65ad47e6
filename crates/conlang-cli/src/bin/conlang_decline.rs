// conlang-decline: Generate declined forms.
//
// In word mode, prints every declined form of each word for one part of
// speech:
//   phonetic<TAB>spelled<TAB>label.label...
//
// In lexicon mode (--all), declines (and optionally derives) the whole
// lexicon of the language file and prints the resulting description as JSON.
//
// Usage:
//   conlang-decline [-l LANGUAGE] -p POS [OPTIONS] [WORD...]
//   conlang-decline [-l LANGUAGE] --all [--derive] [OPTIONS]
//
// Options:
//   -l, --language PATH    Language description (JSON)
//   -p, --pos POS          Part of speech whose affix layers to apply
//   --all                  Decline the whole lexicon and print JSON
//   --derive               With --all, also apply derivations
//   --restore-stress       Keep a leading stress mark on generated forms
//   --max-layers N         Maximum affix layers per part of speech (default: 16)
//   -h, --help             Print help

use std::io::{self, BufRead, Write};

use conlang_phonology::Language;

fn print_forms(
    lang: &Language,
    word: &str,
    part_of_speech: &str,
    out: &mut impl Write,
) -> Result<(), String> {
    let forms = lang
        .expand(word, part_of_speech)
        .map_err(|e| format!("{word}: {e}"))?;
    for form in forms {
        let _ = writeln!(
            out,
            "{}\t{}\t{}",
            form.phonetic,
            lang.spell(&form.phonetic),
            form.declensions.join(".")
        );
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (language_path, args) = conlang_cli::parse_language_path(&args);

    if conlang_cli::wants_help(&args) {
        println!("conlang-decline: Generate declined forms.");
        println!();
        println!("Usage: conlang-decline [-l LANGUAGE] -p POS [OPTIONS] [WORD...]");
        println!("       conlang-decline [-l LANGUAGE] --all [--derive] [OPTIONS]");
        println!();
        println!("Options:");
        println!("  -l, --language PATH    Language description (JSON)");
        println!("  -p, --pos POS          Part of speech whose affix layers to apply");
        println!("  --all                  Decline the whole lexicon and print JSON");
        println!("  --derive               With --all, also apply derivations");
        println!("  --restore-stress       Keep a leading stress mark on generated forms");
        println!("  --max-layers N         Maximum affix layers per part of speech (default: 16)");
        println!("  -h, --help             Print this help");
        return;
    }

    let mut part_of_speech: Option<String> = None;
    let mut whole_lexicon = false;
    let mut derive = false;
    let mut restore_stress = false;
    let mut max_layers: Option<usize> = None;
    let mut words: Vec<String> = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        match arg.as_str() {
            "-p" | "--pos" => {
                if i + 1 < args.len() {
                    part_of_speech = Some(args[i + 1].clone());
                    skip_next = true;
                } else {
                    conlang_cli::fatal(&format!("{arg} requires a value"));
                }
            }
            "--max-layers" => {
                let limit = conlang_cli::parse_max_layers(args.get(i + 1).map(String::as_str))
                    .unwrap_or_else(|e| conlang_cli::fatal(&e));
                max_layers = Some(limit);
                skip_next = true;
            }
            "--all" => whole_lexicon = true,
            "--derive" => derive = true,
            "--restore-stress" => restore_stress = true,
            s if !s.starts_with('-') => words.push(arg.clone()),
            s => conlang_cli::fatal(&format!("unknown option {s}")),
        }
    }

    let mut lang = conlang_cli::load_language(language_path.as_deref())
        .unwrap_or_else(|e| conlang_cli::fatal(&e));
    lang.set_restore_stress(restore_stress);
    if max_layers.is_some() {
        lang.set_max_layers(max_layers);
    }

    if whole_lexicon {
        if derive {
            lang.derive_lexicon()
                .unwrap_or_else(|e| conlang_cli::fatal(&e.to_string()));
        }
        lang.decline_lexicon()
            .unwrap_or_else(|e| conlang_cli::fatal(&e.to_string()));
        let json = conlang_cli::to_json(lang.description()).unwrap_or_else(|e| conlang_cli::fatal(&e));
        println!("{json}");
        return;
    }

    let Some(part_of_speech) = part_of_speech else {
        conlang_cli::fatal("missing -p POS (or use --all)");
    };

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
            if let Err(e) = print_forms(&lang, word, &part_of_speech, &mut out) {
                conlang_cli::fatal(&e);
            }
        }
    } else {
        for word in &words {
            if let Err(e) = print_forms(&lang, word, &part_of_speech, &mut out) {
                conlang_cli::fatal(&e);
            }
        }
    }
}
