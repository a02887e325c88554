#![allow(dead_code)]

use bunner_cors_intercept::{Headers, ResponseDisposition, ResponseOutcome};

pub fn assert_rewritten(outcome: ResponseOutcome) -> Headers {
    match outcome.disposition {
        ResponseDisposition::Rewritten => outcome.headers,
        other => panic!("expected rewritten response, got {:?}", other),
    }
}

pub fn assert_passthrough(
    outcome: ResponseOutcome,
    expected: ResponseDisposition,
    original: &Headers,
) {
    assert_eq!(outcome.disposition, expected);
    assert_eq!(&outcome.headers, original, "pass-through must not touch headers");
}
