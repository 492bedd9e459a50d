use crate::shared::format::format_money;
use leptos::prelude::*;
use thaw::*;

/// Ячейка с суммой, выровненной вправо
#[component]
pub fn TableCellMoney(
    value: f64,
    #[prop(optional)] bold: bool,
) -> impl IntoView {
    let mut styles = vec!["font-variant-numeric: tabular-nums"];
    if value < 0.0 {
        styles.push("color: var(--color-error-700)");
    }
    if bold {
        styles.push("font-weight: 600");
    }

    view! {
        <TableCell class="text-right">
            <span style=styles.join("; ")>{format_money(value)}</span>
        </TableCell>
    }
}
