//! Folder and selector safe identifiers derived from album names.

const EMPTY_BRACKETS: [&str; 6] = ["( )", "()", "[ ]", "[]", "{ }", "{}"];

const ACCENTS: &[(char, &str)] = &[
    ('á', "a"), ('à', "a"), ('ä', "a"), ('â', "a"), ('ã', "a"), ('å', "a"),
    ('é', "e"), ('è', "e"), ('ë', "e"), ('ê', "e"),
    ('í', "i"), ('ì', "i"), ('ï', "i"), ('î', "i"),
    ('ó', "o"), ('ò', "o"), ('ö', "o"), ('ô', "o"), ('õ', "o"), ('ø', "o"),
    ('ú', "u"), ('ù', "u"), ('ü', "u"), ('û', "u"),
    ('ý', "y"), ('ÿ', "y"),
    ('ñ', "n"),
    ('ç', "c"),
    ('ß', "ss"),
    ('æ', "ae"),
    ('œ', "oe"),
    ('ð', "d"),
    ('þ', "th"),
];

const SYMBOLS: &[(char, &str)] = &[
    ('½', "-half"), ('⅓', "-third"), ('¼', "-quarter"), ('¾', "-three-quarters"),
    ('⅛', "-eighth"), ('⅜', "-three-eighths"), ('⅝', "-five-eighths"), ('⅞', "-seven-eighths"),
    ('²', "2"), ('³', "3"), ('¹', "1"),
    ('–', "-"), ('—', "-"), ('−', "-"),
];

// Lowercase only: input is lowercased before transliteration.
const GREEK: &[(char, &str)] = &[
    ('α', "a"), ('ά', "a"),
    ('β', "b"),
    ('γ', "g"),
    ('δ', "d"),
    ('ε', "e"), ('έ', "e"),
    ('ζ', "z"),
    ('η', "e"), ('ή', "e"),
    ('θ', "th"),
    ('ι', "i"), ('ί', "i"), ('ϊ', "i"), ('ΐ', "i"),
    ('κ', "k"),
    ('λ', "l"),
    ('μ', "m"),
    ('ν', "n"),
    ('ξ', "x"),
    ('ο', "o"), ('ό', "o"),
    ('π', "p"),
    ('ρ', "r"),
    ('σ', "s"), ('ς', "s"),
    ('τ', "t"),
    ('υ', "u"), ('ύ', "u"), ('ϋ', "u"), ('ΰ', "u"),
    ('φ', "f"),
    ('χ', "ch"),
    ('ψ', "ps"),
    ('ω', "o"), ('ώ', "o"),
];

fn transliterate(c: char) -> Option<&'static str> {
    ACCENTS
        .iter()
        .chain(SYMBOLS)
        .chain(GREEK)
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

/// Turn an artist or album name into a lowercase, dash separated slug.
///
/// The result only contains alphanumerics and single dashes, never starts or
/// ends with a dash, and is `"unknown"` when nothing usable is left.
pub fn sanitize_slug(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() || EMPTY_BRACKETS.contains(&trimmed) {
        return "unknown".to_string();
    }

    let lowered: Vec<char> = name.to_lowercase().chars().collect();
    let mut out = String::with_capacity(lowered.len());
    let mut in_space = false;

    for (i, &c) in lowered.iter().enumerate() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;

        if c == '_' {
            // "g_d" loses the underscore, "the_puzzle" gets a dash.
            let prev = i.checked_sub(1).and_then(|p| lowered.get(p));
            let next = lowered.get(i + 1);
            let after = lowered.get(i + 2);
            let joins_letters = matches!(prev, Some(p) if p.is_ascii_lowercase())
                && matches!(next, Some(n) if n.is_ascii_lowercase())
                && !matches!(after, Some(a) if a.is_ascii_lowercase());
            if !joins_letters {
                out.push('-');
            }
            continue;
        }

        if let Some(replacement) = transliterate(c) {
            out.push_str(replacement);
        } else if c.is_alphanumeric() || c == '-' {
            out.push(c);
        }
    }

    let collapsed = out
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if collapsed.is_empty() {
        "unknown".to_string()
    } else {
        collapsed
    }
}
