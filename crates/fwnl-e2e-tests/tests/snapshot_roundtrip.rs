//! E2E: a conversation survives being serialized between every turn.

mod helpers;

use fwnl_core::{Session, snapshot};

use helpers::{ACL_ANSWERS, ACL_REQUEST, assistant};

/// Encoding and decoding after each turn reproduces the session exactly,
/// and the dialogue still completes.
#[test]
fn e2e_snapshot_between_turns() {
    let a = assistant();
    let mut wire = snapshot::encode_string(&Session::new());
    let mut last = Vec::new();

    let mut messages = vec![ACL_REQUEST, "yes"];
    messages.extend(ACL_ANSWERS);
    for message in messages {
        let mut session = snapshot::decode(&wire).unwrap();
        last = a.handle(message, &mut session);
        wire = snapshot::encode_string(&session);
        assert_eq!(snapshot::decode(&wire).unwrap(), session);
    }

    assert!(last.last().unwrap().starts_with("define intent acl:"));
    assert_eq!(snapshot::decode(&wire).unwrap(), Session::new());
}

/// A snapshot taken mid-dialogue carries the state, label, answers and counter.
#[test]
fn e2e_snapshot_mid_dialogue_fields() {
    let a = assistant();
    let mut s = Session::new();
    for m in [ACL_REQUEST, "yes", "myrule", "10.0.0.0/24"] {
        a.handle(m, &mut s);
    }

    let json = snapshot::encode(&s);
    let data = &json["_data"];
    assert_eq!(data["0"], "questions");
    assert_eq!(data["1"]["label"], "ACL");
    assert_eq!(data["1"]["commands"][0]["values"][0]["value"], "myrule");
    assert_eq!(data["1"]["commands"][1]["value"], 1);
    assert_eq!(data["1"]["commands"][1]["values"][1]["value"], "10.0.0.0/24");
    assert_eq!(data["2"]["name"], "To");
    assert_eq!(data["3"], 2);

    let restored = snapshot::decode_value(json).unwrap();
    assert_eq!(restored, s);
}
