//! Integration tests composing combinators the way a property runner would

use shrinkray::{
    Arbitrary, ArbitraryExt, AsGenerator, BoxedArbitrary, FromGenerator, Generator,
    GeneratorConfig, IntegerConstraints, OneOfConstraints, Random, WeightedArbitrary, constant,
    frequency, integer,
};

fn ints(min: i32, max: i32) -> shrinkray::IntegerArbitrary {
    integer(IntegerConstraints { min, max }).unwrap()
}

/// Shrink until no candidate fails the property, returning the minimal failing value
fn minimise<T: Clone + 'static>(
    arbitrary: &dyn Arbitrary<T>,
    mut rng: Random,
    fails: impl Fn(&T) -> bool,
) -> Option<T> {
    let start = (0..1000)
        .map(|_| arbitrary.generate(&mut rng, Some(5)))
        .find(|v| fails(v.value()))?;
    let mut current = start;
    while let Some(next) = arbitrary
        .shrink(current.value(), current.context())
        .find(|candidate| fails(candidate.value()))
    {
        current = next;
    }
    Some(current.into_value())
}

#[test]
fn test_map_filter_chain_pipeline_minimises() {
    // Vectors of a dependent length, filtered to non-empty ones
    let arb = ints(0, 8)
        .chain(|len| {
            let len = *len as usize;
            ints(0, 1000)
                .map(move |v| vec![*v; len])
                .boxed()
        })
        .filter(|v: &Vec<i32>| !v.is_empty());

    let minimal = minimise(&arb, Random::new(9), |v| v.iter().sum::<i32>() > 100).unwrap();
    assert!(minimal.iter().sum::<i32>() > 100);
    assert!(!minimal.is_empty());
    assert!(minimal.iter().all(|v| *v == minimal[0]));
    // Once the length is settled the element is minimised for that length
    let len = minimal.len() as i32;
    assert_eq!(minimal[0], 100 / len + 1);
}

#[test]
fn test_zip_minimises_both_components() {
    let arb = ints(-500, 500).zip(ints(0, 500));
    let minimal = minimise(&arb, Random::new(12), |(a, b)| *a > 10 && *b > 20).unwrap();
    assert_eq!(minimal, (11, 21));
}

#[test]
fn test_no_shrink_keeps_first_failure() {
    let arb = ints(0, 1_000_000).no_shrink();
    let mut rng = Random::new(3);
    let first = (0..100)
        .map(|_| arb.generate(&mut rng, Some(5)))
        .find(|v| *v.value() > 10)
        .unwrap();
    assert_eq!(minimise(&arb, Random::new(3), |v| *v > 10), Some(*first.value()));
}

#[test]
fn test_frequency_of_mapped_branches() {
    let small: BoxedArbitrary<String> = ints(0, 9).map(|v| format!("s{}", v)).boxed();
    let large: BoxedArbitrary<String> = ints(100, 999).map(|v| format!("L{}", v)).boxed();
    let arb = frequency(
        vec![
            WeightedArbitrary { weight: 1, arbitrary: small },
            WeightedArbitrary { weight: 4, arbitrary: large },
        ],
        OneOfConstraints::default(),
    )
    .unwrap();
    let minimal = minimise(&arb, Random::new(1), |v| v.starts_with('L')).unwrap();
    assert_eq!(minimal, "L100");
}

#[test]
fn test_legacy_adapters_compose() {
    let generator = AsGenerator::new(ints(0, 50).map_with_inverse(
        |v| v * 3,
        |v| (v % 3 == 0).then(|| v / 3),
    ));
    let arbitrary = FromGenerator::new(generator);
    let mut rng = Random::new(4);
    for _ in 0..20 {
        assert_eq!(arbitrary.generate(&mut rng, None).value() % 3, 0);
    }
    let shrunk: Vec<i32> = arbitrary.shrink(&30, None).map(|v| v.into_value()).collect();
    assert_eq!(shrunk, vec![0, 15, 24, 27]);

    let plain = AsGenerator::new(constant('x'));
    assert_eq!(
        plain.generate(&mut rand::rngs::mock::StepRng::new(0, 1), &GeneratorConfig::default()),
        'x'
    );
}
