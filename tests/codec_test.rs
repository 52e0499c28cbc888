//! Integration tests for the bracketed match record format.

use palimpsest::prelude::*;

fn sample_matches() -> Vec<Match> {
    vec![
        Match::new(0, 0, 0, ""),
        Match::new(1, 8, 2, "A"),
        Match::with_state(2, 5, 2, "B", ChunkState::Found),
        Match::with_state(u16::MAX, u32::MAX, u32::MAX, "Ms-Oxford", ChunkState::Transposed),
        Match::with_state(17, 123_456, 789, "", ChunkState::Deleted),
    ]
}

#[test]
fn test_render_then_parse_keeps_fields() {
    for original in sample_matches() {
        let text = original.render();
        let (parsed, consumed) = Match::parse(text.as_bytes(), 0).unwrap();

        assert_eq!(consumed, text.len());
        assert_eq!(parsed.version(), original.version());
        assert_eq!(parsed.start_offset(), original.start_offset());
        assert_eq!(parsed.length(), original.length());
        assert_eq!(parsed, original);
    }
}

/// Documented limitation: the state text is rendered but never parsed back,
/// so every parsed match carries the `none` tag.
#[test]
fn test_state_is_not_round_tripped() {
    for state in ChunkState::ALL {
        let original = Match::with_state(3, 1, 1, "C", state);
        let (parsed, _) = Match::parse(original.render().as_bytes(), 0).unwrap();
        assert_eq!(parsed.state(), ChunkState::None);
    }
}

#[test]
fn test_empty_short_name_parses_as_version_id() {
    let original = Match::new(42, 3, 4, "");
    let (parsed, _) = Match::parse(original.render().as_bytes(), 0).unwrap();
    assert_eq!(parsed.short_name(), "42");
}

#[test]
fn test_consecutive_records() {
    let matches = sample_matches();
    let stream: String = matches.iter().map(|m| m.render()).collect();
    let buffer = stream.as_bytes();

    let mut pos = 0;
    let mut parsed = Vec::new();
    while pos < buffer.len() {
        let (m, consumed) = Match::parse(buffer, pos).unwrap();
        parsed.push(m);
        pos += consumed;
    }
    assert_eq!(parsed, matches);
    assert_eq!(Match::parse_all(buffer).unwrap(), matches);
}

#[test]
fn test_garbled_labels_parse_identically() {
    let canonical = Match::parse(b"[A:Version 1:Offset 8:Length 2:none]", 0).unwrap().0;
    let garbled = Match::parse(b"[A:Vxrsion 1:Ofset 8:L 2:none]", 0).unwrap().0;
    let bare = Match::parse(b"[A:1:8:2:]", 0).unwrap().0;
    assert_eq!(canonical, garbled);
    assert_eq!(canonical, bare);
}

#[test]
fn test_malformed_records() {
    let cases: [&[u8]; 5] = [
        b"no-bracket-here",
        b"[abc:Version X:Offset 3:Length 2:none]",
        b"[no separator at all",
        b"[A:Version 1:Offset :Length 2:none]",
        b"",
    ];
    for case in cases {
        let err = Match::parse(case, 0).unwrap_err();
        assert!(
            matches!(err, PalimpsestError::Parse(_)),
            "expected parse error for {:?}",
            String::from_utf8_lossy(case)
        );
    }
}

#[test]
fn test_unterminated_final_record_is_accepted() {
    let text = b"[A:Version 1:Offset 0:Length 1:none][B:Version 2:Offset 4:Length 3:found";
    let (_, first) = Match::parse(text, 0).unwrap();
    let (last, consumed) = Match::parse(text, first).unwrap();
    assert_eq!(last, Match::new(2, 4, 3, "B"));
    assert_eq!(first + consumed, text.len());

    let all = Match::parse_all(text).unwrap();
    assert_eq!(all, vec![Match::new(1, 0, 1, "A"), Match::new(2, 4, 3, "B")]);
}

#[test]
fn test_siglum_with_separator_cannot_reach_a_match() {
    let mut mvd = Mvd::new("sigla");
    let err = mvd.add_version(3, "Ms:A", "").unwrap_err();
    assert!(matches!(err, PalimpsestError::Value(_)));

    let json = r#"{"versions":[{"id":1,"short_name":"Ms:A"}],"pairs":[]}"#;
    assert!(Mvd::from_json(json).is_err());
}

#[test]
fn test_every_registered_siglum_survives_render_and_parse() {
    let mut mvd = Mvd::new("sigla");
    let sigla = ["A", "Ms-B.2", "Oxford [fragment]", "Ψ", ""];
    for (id, siglum) in (1u16..).zip(sigla) {
        mvd.add_version(id, siglum, "").unwrap();
    }
    for id in 1..=sigla.len() as u16 {
        let name = mvd.version_short_name(id).unwrap();
        let original = Match::new(id, 7, 3, name);
        let (parsed, _) = Match::parse(original.render().as_bytes(), 0).unwrap();
        assert_eq!(parsed, original);
        let expected = if name.is_empty() { id.to_string() } else { name.to_string() };
        assert_eq!(parsed.short_name(), expected);
    }
}

#[test]
fn test_numeric_overflow_is_value_error() {
    let err = Match::parse(b"[A:Version 1:Offset 4294967296:Length 1:none]", 0).unwrap_err();
    assert!(matches!(err, PalimpsestError::Value(_)));
}

#[test]
fn test_parse_all_stops_on_first_bad_record() {
    let text = b"[A:Version 1:Offset 0:Length 1:none][B:Version Q:Offset 0:Length 1:none]";
    assert!(Match::parse_all(text).unwrap_err().is_parse());
}
