use super::*;

#[test]
fn abc_maps_to_one_char_parts() {
    assert_eq!(raw_values("abc").unwrap(), [0.0, 1.0, 2.0]);
    let seeds = derive_seeds("abc").unwrap();
    assert_eq!(
        seeds,
        Seeds {
            red: 50.0,
            green: 49.0,
            blue: 48.0
        }
    );
    assert_eq!(seeds.channels(), [50.0, 49.0, 48.0]);
}

#[test]
fn input_is_lowercased_first() {
    assert_eq!(derive_seeds("ABC").unwrap(), derive_seeds("abc").unwrap());
    assert_eq!(
        derive_seeds("TestUser").unwrap(),
        derive_seeds("testuser").unwrap()
    );
}

#[test]
fn leftover_characters_land_in_last_part() {
    // "testuser": 8 chars -> "te" | "st" | "user"
    let [r, g, b] = raw_values("testuser").unwrap();
    assert_eq!(r, (19.0 + 4.0) / 2.0);
    assert_eq!(g, (18.0 + 19.0) / 2.0);
    assert_eq!(b, (20.0 + 18.0 + 4.0 + 17.0) / 4.0);
}

#[test]
fn character_weights() {
    assert_eq!(char_weight('a'), 0);
    assert_eq!(char_weight('z'), 25);
    assert_eq!(char_weight('0'), 0);
    assert_eq!(char_weight('7'), 7);
    assert_eq!(char_weight('_'), 35);
    // Permissive: everything else is a code-point offset from 'a'.
    assert_eq!(char_weight('-'), i64::from(b'-') - 97);
    assert_eq!(char_weight('é'), 0xE9 - 97);
}

#[test]
fn digits_and_underscores_fold_as_documented() {
    // "9_a": parts "9" | "_" | "a"
    assert_eq!(raw_values("9_a").unwrap(), [9.0, 35.0, 0.0]);
    let seeds = derive_seeds("9_a").unwrap();
    assert_eq!(seeds.channels(), [41.0, 15.0, 50.0]);
}

#[test]
fn short_identifiers_are_rejected() {
    for id in ["", "a", "ab"] {
        let err = derive_seeds(id).unwrap_err();
        assert!(matches!(err, AvatarError::InvalidIdentifier(_)), "{id:?}");
    }
}

#[test]
fn length_counts_characters_not_bytes() {
    // Three characters, six bytes.
    assert!(derive_seeds("ééé").is_ok());
}

#[test]
fn empty_part_has_no_value() {
    assert_eq!(part_value(&[]), None);
    assert_eq!(part_value(&['b', 'd']), Some(2.0));
}

#[test]
fn underscore_counts_flat_35() {
    // A fall-through to the code-point rule would add ord('_') - 97 = -2 on top (33 total).
    assert_eq!(char_weight('_'), 35);
    let seeds = derive_seeds("a_b").unwrap();
    assert_eq!(seeds.channels(), [50.0, 15.0, 49.0]);
}
