//! Integration tests for the serbench harness

use proptest::prelude::*;
use serbench::prelude::*;

#[test]
fn test_library_version() {
    assert!(!serbench::VERSION.is_empty());
    assert_eq!(serbench::CRATE_NAME, "serbench");
}

#[test]
fn test_round_trip_all_codecs_buffered() {
    let fixture = generate(2, 4, true, true).expect("Failed to generate fixture");
    let profile = Profile::baseline().with_verification(true);

    let registry = standard_registry::<TestStruc>();
    for entry in registry.iter() {
        let result = run_codec(entry.name(), entry.codec(), &fixture, &profile);
        assert!(
            !result.is_failure(),
            "{} failed: {:?}",
            result.name,
            result.error
        );
        assert_eq!(result.verification, Verdict::Passed, "{}", result.name);
        assert!(result.encoded_len > 0);
    }
}

#[test]
fn test_round_trip_all_codecs_streaming() {
    let fixture = generate(1, 2, true, true).expect("Failed to generate fixture");
    let profile = Profile::baseline()
        .with_transport(Transport::Streaming)
        .with_verification(true);

    let registry = standard_registry::<TestStruc>();
    for entry in registry.iter() {
        let result = run_codec(entry.name(), entry.codec(), &fixture, &profile);
        assert!(
            !result.is_failure(),
            "{} failed: {:?}",
            result.name,
            result.error
        );
        assert_eq!(result.verification, Verdict::Passed, "{}", result.name);
    }
}

#[test]
fn test_decode_replaces_prepopulated_target() {
    // a decode target carrying stale state must end up wholly replaced
    let fixture = generate(0, 2, true, true).expect("Failed to generate fixture");
    let profile = Profile::baseline();

    let mut stale = generate(1, 7, true, true).expect("Failed to generate stale value");
    let encoded = JsonCodec
        .encode(&fixture, Vec::new(), &profile)
        .expect("Failed to encode");
    JsonCodec
        .decode(&encoded, &mut stale, &profile)
        .expect("Failed to decode");
    assert_eq!(stale, fixture);
    assert!(stale.nested.is_none());
}

#[test]
fn test_faulty_codec_does_not_poison_the_run() {
    struct AlwaysPanics;

    impl Codec<TestStruc> for AlwaysPanics {
        fn encode(
            &self,
            _value: &TestStruc,
            _scratch: Vec<u8>,
            _profile: &Profile,
        ) -> serbench::error::CodecResult<Vec<u8>> {
            panic!("backend bug");
        }

        fn decode(
            &self,
            _bytes: &[u8],
            _target: &mut TestStruc,
            _profile: &Profile,
        ) -> serbench::error::CodecResult<()> {
            panic!("backend bug");
        }
    }

    let fixture = generate(0, 1, true, true).expect("Failed to generate fixture");
    let profile = Profile::baseline().with_verification(true);

    let mut registry: CodecRegistry<TestStruc> = CodecRegistry::new();
    registry.register("json", JsonCodec).expect("register json");
    registry
        .register("broken", AlwaysPanics)
        .expect("register broken");
    registry
        .register("msgpack", serbench::codec::MsgpackCodec)
        .expect("register msgpack");

    let results = run_registry(&registry, &fixture, &profile);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].verification, Verdict::Passed);
    assert!(results[1].is_failure());
    assert_eq!(results[2].verification, Verdict::Passed);
}

#[test]
fn test_standard_sweep_end_to_end() {
    let mut harness = Harness::with_standard_codecs();
    let before = harness.current().clone();
    let profiles = standard_sweep();

    let mut labels = Vec::new();
    let runs = harness
        .sweep(&profiles, |run| labels.push(run.profile.label.clone()))
        .expect("sweep failed");

    assert_eq!(runs.len(), profiles.len());
    for run in &runs {
        assert_eq!(run.results.len(), harness.registry().len());
        for result in &run.results {
            assert!(
                !result.is_failure(),
                "{} under {}: {:?}",
                result.name,
                run.profile.label,
                result.error
            );
        }
    }
    // points ran in list order and the prior profile was restored
    let expected: Vec<String> = profiles.iter().map(|p| p.label.clone()).collect();
    assert_eq!(labels, expected);
    assert_eq!(*harness.current(), before);
}

#[test]
fn test_sweep_aborts_on_fixture_failure_but_restores() {
    let mut harness = Harness::with_standard_codecs();
    let before = harness.current().clone();
    let profiles = vec![
        Profile::baseline(),
        Profile::baseline().with_label("too-deep").with_depth(99),
    ];
    let err = harness.sweep(&profiles, |_| {}).unwrap_err();
    assert!(matches!(err, serbench::Error::Fixture(_)));
    assert_eq!(*harness.current(), before);
}

#[test]
fn test_worked_example_scenario() {
    // depth 1, repeat 4: one nested level keyed by "0" repeated 4 times
    let fixture = generate(1, 4, true, true).expect("Failed to generate fixture");
    assert_eq!(
        fixture.common.s,
        serbench::fixture::LONG_SENTENCE.repeat(4)
    );
    assert_eq!(fixture.nesting_levels(), 1);
    let child = fixture.mts.get("0000").expect("child keyed by 0000");
    assert!(child.nested.is_none());

    let profile = Profile::baseline().with_verification(true);
    let result = run_codec("json", &JsonCodec, &fixture, &profile);
    assert_eq!(result.verification, Verdict::Passed);
}

#[test]
fn test_estimate_scales_with_repeat_factor() {
    let small = generate(1, 1, true, true).expect("Failed to generate fixture");
    let large = generate(1, 16, true, true).expect("Failed to generate fixture");
    assert!(estimate_size(&large) > estimate_size(&small));
}

proptest! {
    #[test]
    fn prop_generation_is_deterministic(depth in 0usize..=3, repeat in 0usize..=8) {
        let a = generate(depth, repeat, true, true).unwrap();
        let b = generate(depth, repeat, true, true).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_interned_strings_share_one_allocation(n in 0usize..=32) {
        let a = serbench::fixture::intern_repeated(n, "base");
        let b = serbench::fixture::intern_repeated(n, "base");
        prop_assert!(std::sync::Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn prop_string_estimate_is_header_plus_len(s in ".{0,64}") {
        let owned = s.to_string();
        prop_assert_eq!(
            estimate_size(&owned),
            std::mem::size_of::<String>() + owned.len()
        );
    }

    #[test]
    fn prop_sequence_estimate_is_additive(values in proptest::collection::vec(any::<u64>(), 0..32)) {
        let elems: usize = values.iter().map(estimate_size).sum();
        prop_assert_eq!(
            estimate_size(&values),
            std::mem::size_of::<Vec<u64>>() + elems
        );
    }

    #[test]
    fn prop_binary_codecs_round_trip_shallow_fixtures(repeat in 0usize..=4) {
        let fixture = generate(0, repeat, true, true).unwrap();
        let profile = Profile::baseline().with_verification(true);
        for entry in standard_registry::<TestStruc>().iter() {
            let result = run_codec(entry.name(), entry.codec(), &fixture, &profile);
            prop_assert_eq!(result.verification, Verdict::Passed);
        }
    }
}
