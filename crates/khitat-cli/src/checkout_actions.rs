// SPDX-License-Identifier: Apache-2.0

use crate::config::CartConfig;
use crate::helpers::{emit_ok, open_store};
use crate::{CheckoutCommand, CliError, OutputMode};
use khitat_checkout::{
    generate_checkout_code, payment_instructions, CheckoutErrorCode, CheckoutFlow,
    JsonDirOrderSink,
};
use khitat_model::CheckoutCode;
use serde_json::json;

pub(crate) fn run_checkout_command(
    command: CheckoutCommand,
    config: &CartConfig,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    match command {
        CheckoutCommand::Instructions { method, locale } => emit_ok(
            output_mode,
            json!({
                "command": "checkout instructions",
                "instructions": payment_instructions(method, locale),
            }),
        )
        .map_err(CliError::internal),
        CheckoutCommand::Code => emit_ok(
            output_mode,
            json!({"command": "checkout code", "code": generate_checkout_code()}),
        )
        .map_err(CliError::internal),
        CheckoutCommand::Submit { method, code } => {
            let mut flow = match code {
                Some(raw) => CheckoutFlow::with_code(
                    CheckoutCode::parse(&raw)
                        .map_err(|e| CliError::validation("validation_error", e.to_string()))?,
                ),
                None => CheckoutFlow::new(),
            };
            flow.select_method(method);
            let code = flow.code().clone();
            let mut store = open_store(config);
            let sink = JsonDirOrderSink::new(config.order_root().to_path_buf());
            let receipt = flow.submit(&mut store, &sink).map_err(|err| match err.code {
                CheckoutErrorCode::Submission => {
                    CliError::dependency(err.code.as_str(), err.message)
                        .with_code_detail(&code)
                }
                _ => CliError::validation(err.code.as_str(), err.message),
            })?;
            emit_ok(
                output_mode,
                json!({"command": "checkout submit", "receipt": receipt}),
            )
            .map_err(CliError::internal)
        }
    }
}

impl CliError {
    /// Lets the donor retry a failed submission with `--code`.
    fn with_code_detail(mut self, code: &CheckoutCode) -> Self {
        self.machine = self.machine.with_detail("code", code.as_str());
        self
    }
}
