use std::sync::atomic::{AtomicU64, Ordering};

use contracts::domain::a003_item::Item;
use contracts::shared::totals::line_amount;
use contracts::shared::validation::FieldError;
use leptos::prelude::*;
use thaw::*;

use crate::shared::format::{format_money, parse_amount};

static NEXT_LINE_ID: AtomicU64 = AtomicU64::new(1);

/// Строка табличной части формы; значения хранятся как текст полей ввода
#[derive(Clone, Copy)]
pub struct ItemLine {
    pub id: u64,
    pub item_code: RwSignal<String>,
    pub qty: RwSignal<String>,
    pub rate: RwSignal<String>,
}

impl ItemLine {
    pub fn new() -> Self {
        Self {
            id: NEXT_LINE_ID.fetch_add(1, Ordering::Relaxed),
            item_code: RwSignal::new(String::new()),
            qty: RwSignal::new("1".to_string()),
            rate: RwSignal::new(String::new()),
        }
    }

    pub fn qty_value(&self) -> f64 {
        parse_amount(&self.qty.get()).unwrap_or(0.0)
    }

    pub fn rate_value(&self) -> Option<f64> {
        parse_amount(&self.rate.get())
    }
}

impl Default for ItemLine {
    fn default() -> Self {
        Self::new()
    }
}

/// Ошибки строки `idx`: поля вида `items[idx].qty`
fn row_errors(errors: &[FieldError], prefix: &str, idx: usize) -> Vec<String> {
    let key = format!("{}[{}].", prefix, idx);
    errors
        .iter()
        .filter(|e| e.field.starts_with(&key))
        .map(|e| e.message.clone())
        .collect()
}

/// Редактор табличной части: товар, количество, цена, сумма
#[component]
pub fn ItemLinesEditor(
    lines: RwSignal<Vec<ItemLine>>,
    #[prop(into)] items: Signal<Vec<Item>>,
    errors: RwSignal<Vec<FieldError>>,
    /// Префикс имени поля в ошибках валидации
    #[prop(optional)]
    field_prefix: Option<&'static str>,
    /// Показывать цену и сумму строки
    #[prop(optional)]
    with_rate: bool,
) -> impl IntoView {
    let prefix = field_prefix.unwrap_or("items");

    let add_line = move |_| lines.update(|l| l.push(ItemLine::new()));

    view! {
        <div class="item-lines">
            <table class="item-lines__table">
                <thead>
                    <tr>
                        <th>"Товар"</th>
                        <th style="width: 110px;">"Кол-во"</th>
                        {with_rate.then(|| view! {
                            <th style="width: 130px;">"Цена"</th>
                            <th style="width: 140px;">"Сумма"</th>
                        })}
                        <th style="width: 40px;"></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || lines.get()
                        key=|line| line.id
                        children=move |line| {
                            let id = line.id;
                            let index = move || lines.with(|l| l.iter().position(|x| x.id == id).unwrap_or(0));

                            // Цена подставляется из карточки товара при смене товара
                            if with_rate {
                                Effect::new(move |prev: Option<String>| {
                                    let code = line.item_code.get();
                                    let changed = match prev.as_deref() {
                                        Some(p) => p != code,
                                        None => line.rate.get_untracked().is_empty(),
                                    };
                                    if changed {
                                        let rate = items.with_untracked(|list| {
                                            list.iter().find(|i| i.code() == code).map(|i| i.standard_rate)
                                        });
                                        if let Some(rate) = rate {
                                            line.rate.set(rate.to_string());
                                        }
                                    }
                                    code
                                });
                            }

                            view! {
                                <tr>
                                    <td>
                                        <Select value=line.item_code>
                                            <option value="">"— товар —"</option>
                                            {move || items.get().into_iter().map(|i| {
                                                let code = i.code().to_string();
                                                let label = format!("{} ({})", i.item_name, code);
                                                view! { <option value=code>{label}</option> }
                                            }).collect_view()}
                                        </Select>
                                    </td>
                                    <td>
                                        <Input input_type=InputType::Number value=line.qty />
                                    </td>
                                    {with_rate.then(|| view! {
                                        <td>
                                            <Input input_type=InputType::Number value=line.rate />
                                        </td>
                                        <td class="text-right">
                                            {move || format_money(line_amount(line.qty_value(), line.rate_value().unwrap_or(0.0)))}
                                        </td>
                                    })}
                                    <td>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| lines.update(|l| l.retain(|x| x.id != id))
                                        >
                                            "✕"
                                        </Button>
                                    </td>
                                </tr>
                                {move || {
                                    let messages = errors.with(|e| row_errors(e, prefix, index()));
                                    (!messages.is_empty()).then(|| view! {
                                        <tr class="item-lines__error">
                                            <td colspan="5">{messages.join("; ")}</td>
                                        </tr>
                                    })
                                }}
                            }
                        }
                    />
                </tbody>
            </table>
            <Button appearance=ButtonAppearance::Secondary on_click=add_line>
                "+ Добавить строку"
            </Button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_errors_match_index() {
        let errors = vec![
            FieldError { field: "items[0].qty".into(), message: "a".into() },
            FieldError { field: "items[1].rate".into(), message: "b".into() },
            FieldError { field: "items".into(), message: "c".into() },
        ];
        assert_eq!(row_errors(&errors, "items", 1), vec!["b".to_string()]);
        assert!(row_errors(&errors, "items", 2).is_empty());
    }
}
