use shrinkray::Random;
use shrinkray_commands::ReplayPathError;
use shrinkray_commands::replay_path::{parse, stringify};

fn all_paths(len: usize) -> impl Iterator<Item = Vec<bool>> {
    (0u32..(1 << len)).map(move |bits| (0..len).map(|i| bits & (1 << i) != 0).collect())
}

#[test]
fn test_round_trip_every_short_path() {
    for len in 0..=10 {
        for path in all_paths(len) {
            let encoded = stringify(&path);
            assert_eq!(parse(&encoded).unwrap(), path, "path {:?} as {}", path, encoded);
        }
    }
}

#[test]
fn test_round_trip_long_runs() {
    let mut path = vec![true; 200];
    path.push(false);
    path.extend(std::iter::repeat_n(true, 64));
    path.extend(std::iter::repeat_n(false, 65));

    let encoded = stringify(&path);
    assert_eq!(parse(&encoded).unwrap(), path);
}

#[test]
fn test_round_trip_random_paths() {
    let mut rng = Random::new(77);
    for _ in 0..200 {
        let len = rng.next_int(0, 500) as usize;
        let path: Vec<bool> = (0..len).map(|_| rng.next(1) == 1).collect();
        assert_eq!(parse(&stringify(&path)).unwrap(), path);
    }
}

#[test]
fn test_encoding_only_uses_the_alphabet() {
    let mut rng = Random::new(3);
    let path: Vec<bool> = (0..1000).map(|_| rng.next(2) == 0).collect();
    let encoded = stringify(&path);

    let (counts, changes) = encoded.split_once(':').unwrap();
    assert!(
        counts
            .chars()
            .chain(changes.chars())
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/')
    );
    // One change character per six runs
    assert_eq!(changes.len(), counts.len().div_ceil(6));
}

#[test]
fn test_malformed_paths() {
    assert_eq!(parse(""), Err(ReplayPathError::MissingSeparator));
    assert!(matches!(
        parse("AB:é"),
        Err(ReplayPathError::InvalidCharacter { character: 'é', .. })
    ));
    assert!(matches!(
        parse("AAAAAAA:"),
        Err(ReplayPathError::TruncatedChanges { runs: 7, .. })
    ));
}
