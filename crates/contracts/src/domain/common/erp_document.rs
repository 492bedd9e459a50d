/// Трейт для view-model документа ERP
///
/// Статические метаданные doctype: имя коллекции в ERP, поля для списка
/// и подписи для UI. Данные и правила документа принадлежат ERP.
pub trait ErpDocument {
    /// Индекс модуля в системе (например, "a004")
    fn module_index() -> &'static str;

    /// Имя doctype в ERP (например, "Sales Invoice")
    fn doctype() -> &'static str;

    /// Поля, запрашиваемые для списка
    fn list_fields() -> &'static [&'static str];

    /// Имя элемента для UI (единственное число)
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число)
    fn list_name() -> &'static str;

    /// Уникальное имя документа в ERP
    fn name(&self) -> &str;

    /// Поле даты для фильтра по периоду, если оно есть у doctype
    fn date_field() -> Option<&'static str> {
        None
    }

    /// Полное имя модуля (например, "a004_sales_invoice")
    fn full_name() -> String {
        format!(
            "{}_{}",
            Self::module_index(),
            Self::doctype().to_lowercase().replace(' ', "_")
        )
    }
}
