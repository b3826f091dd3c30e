// SPDX-License-Identifier: Apache-2.0

use khitat_core::ResultExt;

#[test]
fn result_ext_attaches_static_context() {
    let r: Result<(), &str> = Err("bad");
    let err = r.with_context("read cart config").expect_err("must error");
    assert_eq!(err.context, "read cart config");
    assert_eq!(err.source, "bad");
    assert_eq!(err.to_string(), "read cart config: bad");
}
