//! Porter stemming for English tokens.
//!
//! Implements the classic 1980 algorithm (steps 1a, 1b, 1b′, 1c, 2, 3, 4,
//! 5a, 5b) over lowercase ASCII words. Tokens shorter than three letters or
//! containing anything other than lowercase ASCII are returned unchanged.
//!
//! # Letter classification
//!
//! A letter is a consonant if it is not `a e i o u`, with `y` counting as a
//! vowel when the preceding letter is a consonant ("sky" → c-c-v). The
//! *measure* m of a word is the number of vowel→consonant transitions, so
//! "tree" has m=0, "trouble" m=1, "oaten" m=1, "private" m=2.

/// Stem a single lowercase token.
pub fn stem(word: &str) -> String {
    if word.len() < 3 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return word.to_string();
    }

    let mut w = word.as_bytes().to_vec();
    step_1a(&mut w);
    step_1b(&mut w);
    step_1c(&mut w);
    step_2(&mut w);
    step_3(&mut w);
    step_4(&mut w);
    step_5a(&mut w);
    step_5b(&mut w);

    String::from_utf8_lossy(&w).into_owned()
}

// ── Letter classification ──

fn is_consonant(w: &[u8], i: usize) -> bool {
    match w[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(w, i - 1),
        _ => true,
    }
}

/// Number of vowel→consonant transitions (the Porter measure m).
fn measure(w: &[u8]) -> usize {
    let mut m = 0;
    let mut prev_vowel = false;
    for i in 0..w.len() {
        let cons = is_consonant(w, i);
        if cons && prev_vowel {
            m += 1;
        }
        prev_vowel = !cons;
    }
    m
}

fn has_vowel(w: &[u8]) -> bool {
    (0..w.len()).any(|i| !is_consonant(w, i))
}

/// Ends with a double consonant (e.g., -tt, -ss).
fn ends_double_consonant(w: &[u8]) -> bool {
    let n = w.len();
    n >= 2 && w[n - 1] == w[n - 2] && is_consonant(w, n - 1)
}

/// Ends consonant-vowel-consonant where the final consonant is not w, x, or y.
fn ends_cvc(w: &[u8]) -> bool {
    let n = w.len();
    n >= 3
        && is_consonant(w, n - 3)
        && !is_consonant(w, n - 2)
        && is_consonant(w, n - 1)
        && !matches!(w[n - 1], b'w' | b'x' | b'y')
}

fn ends_with(w: &[u8], suffix: &str) -> bool {
    w.len() >= suffix.len() && &w[w.len() - suffix.len()..] == suffix.as_bytes()
}

/// Replace a matched suffix with a replacement.
fn set_suffix(w: &mut Vec<u8>, suffix: &str, replacement: &str) {
    let stem_len = w.len() - suffix.len();
    w.truncate(stem_len);
    w.extend_from_slice(replacement.as_bytes());
}

// ── Steps ──

/// Plurals: sses → ss, ies → i, s → "".
fn step_1a(w: &mut Vec<u8>) {
    if ends_with(w, "sses") {
        w.truncate(w.len() - 2);
    } else if ends_with(w, "ies") {
        w.truncate(w.len() - 2);
    } else if ends_with(w, "ss") {
        // unchanged
    } else if ends_with(w, "s") {
        w.truncate(w.len() - 1);
    }
}

/// Past tense and gerunds: eed → ee (m>0), ed / ing dropped when the stem
/// contains a vowel, with the 1b′ cleanup afterwards.
fn step_1b(w: &mut Vec<u8>) {
    if ends_with(w, "eed") {
        if measure(&w[..w.len() - 3]) > 0 {
            w.truncate(w.len() - 1);
        }
        return;
    }

    let removed = if ends_with(w, "ed") && has_vowel(&w[..w.len() - 2]) {
        w.truncate(w.len() - 2);
        true
    } else if ends_with(w, "ing") && has_vowel(&w[..w.len() - 3]) {
        w.truncate(w.len() - 3);
        true
    } else {
        false
    };

    if removed {
        step_1b_cleanup(w);
    }
}

/// After removing -ed/-ing: restore e (conflat → conflate), undouble a
/// trailing consonant (hopp → hop), or add e to a short cvc stem
/// (fil → file).
fn step_1b_cleanup(w: &mut Vec<u8>) {
    if ends_with(w, "at") || ends_with(w, "bl") || ends_with(w, "iz") {
        w.push(b'e');
    } else if ends_double_consonant(w) && !matches!(w[w.len() - 1], b'l' | b's' | b'z') {
        w.truncate(w.len() - 1);
    } else if measure(w) == 1 && ends_cvc(w) {
        w.push(b'e');
    }
}

/// Terminal y → i when the stem contains a vowel (happy → happi).
fn step_1c(w: &mut Vec<u8>) {
    if ends_with(w, "y") && has_vowel(&w[..w.len() - 1]) {
        let n = w.len();
        w[n - 1] = b'i';
    }
}

/// Apply the first matching suffix rule whose stem has measure > `min_m`.
///
/// Only the first matching suffix is considered; if its measure condition
/// fails the word is left alone, per the original algorithm.
fn apply_rules(w: &mut Vec<u8>, rules: &[(&str, &str)], min_m: usize) {
    for &(suffix, replacement) in rules {
        if ends_with(w, suffix) {
            if measure(&w[..w.len() - suffix.len()]) > min_m {
                set_suffix(w, suffix, replacement);
            }
            return;
        }
    }
}

/// Double suffixes: -ational → -ate, -iveness → -ive, etc. (m > 0).
fn step_2(w: &mut Vec<u8>) {
    const RULES: &[(&str, &str)] = &[
        ("ational", "ate"),
        ("tional", "tion"),
        ("enci", "ence"),
        ("anci", "ance"),
        ("izer", "ize"),
        ("abli", "able"),
        ("alli", "al"),
        ("entli", "ent"),
        ("eli", "e"),
        ("ousli", "ous"),
        ("ization", "ize"),
        ("ation", "ate"),
        ("ator", "ate"),
        ("alism", "al"),
        ("iveness", "ive"),
        ("fulness", "ful"),
        ("ousness", "ous"),
        ("aliti", "al"),
        ("iviti", "ive"),
        ("biliti", "ble"),
    ];
    apply_rules(w, RULES, 0);
}

/// -icate, -ative, -alize, -iciti, -ical, -ful, -ness (m > 0).
fn step_3(w: &mut Vec<u8>) {
    const RULES: &[(&str, &str)] = &[
        ("icate", "ic"),
        ("ative", ""),
        ("alize", "al"),
        ("iciti", "ic"),
        ("ical", "ic"),
        ("ful", ""),
        ("ness", ""),
    ];
    apply_rules(w, RULES, 0);
}

/// Strip residual suffixes when m > 1; -ion additionally requires the stem
/// to end in s or t.
fn step_4(w: &mut Vec<u8>) {
    const RULES: &[(&str, &str)] = &[
        ("al", ""),
        ("ance", ""),
        ("ence", ""),
        ("er", ""),
        ("ic", ""),
        ("able", ""),
        ("ible", ""),
        ("ant", ""),
        ("ement", ""),
        ("ment", ""),
        ("ent", ""),
        ("ou", ""),
        ("ism", ""),
        ("ate", ""),
        ("iti", ""),
        ("ous", ""),
        ("ive", ""),
        ("ize", ""),
    ];

    // -ion carries an extra stem condition; no other step-4 suffix can
    // match a word ending in -ion, so it is safe to check first.
    if ends_with(w, "ion") {
        let stem = &w[..w.len() - 3];
        if measure(stem) > 1 && (stem.ends_with(b"s") || stem.ends_with(b"t")) {
            w.truncate(w.len() - 3);
        }
        return;
    }

    apply_rules(w, RULES, 1);
}

/// Drop a terminal e when m > 1, or when m == 1 and the stem is not a short
/// cvc word (probate → probat, but rate stays rate).
fn step_5a(w: &mut Vec<u8>) {
    if ends_with(w, "e") {
        let stem = &w[..w.len() - 1];
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            w.truncate(w.len() - 1);
        }
    }
}

/// Undouble a terminal ll when m > 1 (controll → control).
fn step_5b(w: &mut Vec<u8>) {
    if measure(w) > 1 && ends_double_consonant(w) && w[w.len() - 1] == b'l' {
        w.truncate(w.len() - 1);
    }
}
