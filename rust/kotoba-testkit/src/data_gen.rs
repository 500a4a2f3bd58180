//! Data generation utilities for testing.

/// Kana used for generated readings and suffixes.
const KANA: &[char] = &[
    'あ', 'い', 'う', 'え', 'お', 'か', 'き', 'く', 'け', 'こ', 'さ', 'し', 'す', 'せ', 'そ', 'た',
    'ち', 'つ', 'て', 'と', 'な', 'に', 'ぬ', 'ね', 'の', 'ま', 'み', 'む', 'め', 'も', 'る', 'れ',
    'わ', 'ん',
];

/// A generated conjugation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedForm {
    pub key_suffix: String,
    pub value_suffix: String,
    pub conjugation_id: u16,
}

/// A generated POS with one or more forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPos {
    pub name: String,
    pub forms: Vec<GeneratedForm>,
}

/// Generates `pos_count` POS with distinct names and between 1 and `max_forms`
/// forms each.
///
/// Names are emitted in random order, so consumers that need POS-sorted output
/// must sort themselves. Suffixes are short kana strings and may be empty; the
/// same seed always produces the same result.
pub fn generate_pos_set(seed: u64, pos_count: usize, max_forms: usize) -> Vec<GeneratedPos> {
    assert_ne!(max_forms, 0);
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut set: Vec<GeneratedPos> = (0..pos_count)
        .map(|i| {
            let forms = (0..rng.usize(1..=max_forms))
                .map(|_| {
                    let suffix = kana_string(&mut rng, 0..3);
                    // Written-form suffixes usually match the reading.
                    let value_suffix = if rng.u8(0..4) == 0 {
                        kana_string(&mut rng, 0..3)
                    } else {
                        suffix.clone()
                    };
                    GeneratedForm {
                        key_suffix: suffix,
                        value_suffix,
                        conjugation_id: rng.u16(..),
                    }
                })
                .collect();
            GeneratedPos {
                name: format!("品詞{i:04}"),
                forms,
            }
        })
        .collect();
    rng.shuffle(&mut set);
    set
}

/// Generates `count` random kana stems of 1 to 4 characters.
pub fn generate_stems(seed: u64, count: usize) -> Vec<String> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..count).map(|_| kana_string(&mut rng, 1..5)).collect()
}

/// Returns a copy of a packed record array with the order of its fixed-size
/// records reversed.
///
/// # Panics
///
/// Panics if `data.len()` is not a multiple of `record_size`.
pub fn reverse_records(data: &[u8], record_size: usize) -> Vec<u8> {
    assert_eq!(data.len() % record_size, 0);
    data.chunks_exact(record_size).rev().flatten().copied().collect()
}

fn kana_string(rng: &mut fastrand::Rng, len: std::ops::Range<usize>) -> String {
    (0..rng.usize(len)).map(|_| KANA[rng.usize(..KANA.len())]).collect()
}
