// SPDX-License-Identifier: Apache-2.0

use khitat_model::{CheckoutMethod, Locale};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionRow {
    pub label: &'static str,
    pub value: &'static str,
}

/// What the donor needs to set up the transfer for one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentInstructions {
    pub method: CheckoutMethod,
    pub title: &'static str,
    pub rows: Vec<InstructionRow>,
}

const fn row(label: &'static str, value: &'static str) -> InstructionRow {
    InstructionRow { label, value }
}

#[must_use]
pub fn payment_instructions(method: CheckoutMethod, locale: Locale) -> PaymentInstructions {
    let ar = locale == Locale::Ar;
    let pick = |en: &'static str, arabic: &'static str| if ar { arabic } else { en };
    let (title, rows) = match method {
        CheckoutMethod::WesternUnion => (
            pick("Western Union", "ويسترن يونيون"),
            vec![
                row(pick("Name", "الاسم"), "Khitat Al-Ihsan Charitable Organization"),
                row(pick("Country", "البلد"), "Lebanon"),
                row("Phone", "+961 3 976 426"),
            ],
        ),
        CheckoutMethod::Wise => (
            "Wise",
            vec![
                row(pick("Account Name", "الاسم"), "Khitat Al-Ihsan Charity"),
                row(pick("Currency", "العملة"), "USD"),
                row(
                    pick("Note", "ملاحظة"),
                    pick("Include transfer code", "أدخل رمز التحويل"),
                ),
            ],
        ),
    };
    PaymentInstructions {
        method,
        title,
        rows,
    }
}
