//! Human readable description of listing edits, stored in the history.

use std::fmt;

use uuid::Uuid;

use crate::domain::entities::Property;
use crate::domain::value_objects::PropertyStatus;

const EMPTY: &str = "пусто";

trait HistoryValue {
    fn render(&self) -> String;
}

impl<T: fmt::Display> HistoryValue for Option<T> {
    fn render(&self) -> String {
        match self {
            Some(value) => value.to_string(),
            None => EMPTY.to_string(),
        }
    }
}

impl HistoryValue for bool {
    fn render(&self) -> String {
        if *self { "да" } else { "нет" }.to_string()
    }
}

impl HistoryValue for PropertyStatus {
    fn render(&self) -> String {
        self.as_db_str().to_string()
    }
}

impl HistoryValue for Uuid {
    fn render(&self) -> String {
        self.to_string()
    }
}

fn compare<T: PartialEq + HistoryValue>(changes: &mut Vec<String>, label: &str, before: &T, after: &T) {
    if before != after {
        changes.push(format!("{}: {} → {}", label, before.render(), after.render()));
    }
}

/// One `"Label: old → new"` entry per field that differs.
pub fn describe_changes(before: &Property, after: &Property) -> Vec<String> {
    let mut changes = Vec::new();
    compare(&mut changes, "Категория", &before.category_id, &after.category_id);
    compare(&mut changes, "Район", &before.district_id, &after.district_id);
    compare(&mut changes, "Здание", &before.building_id, &after.building_id);
    compare(&mut changes, "Квартира", &before.apartment, &after.apartment);
    compare(&mut changes, "Этаж", &before.floor, &after.floor);
    compare(&mut changes, "Этажность", &before.total_floors, &after.total_floors);
    compare(&mut changes, "Общая площадь", &before.total_area, &after.total_area);
    compare(&mut changes, "Жилая площадь", &before.living_area, &after.living_area);
    compare(&mut changes, "Площадь кухни", &before.kitchen_area, &after.kitchen_area);
    compare(&mut changes, "Количество комнат", &before.rooms, &after.rooms);
    compare(&mut changes, "Высота потолков", &before.ceiling_height, &after.ceiling_height);
    compare(&mut changes, "Балкон", &before.balcony, &after.balcony);
    compare(&mut changes, "Лоджия", &before.loggia, &after.loggia);
    compare(&mut changes, "Планировка", &before.layout, &after.layout);
    compare(&mut changes, "Материал стен", &before.wall_material, &after.wall_material);
    compare(&mut changes, "Состояние", &before.condition, &after.condition);
    compare(&mut changes, "Год постройки", &before.year_built, &after.year_built);
    compare(&mut changes, "Телефон", &before.phone, &after.phone);
    compare(&mut changes, "Источник", &before.source, &after.source);
    compare(&mut changes, "Ремонт", &before.renovation, &after.renovation);
    compare(&mut changes, "Поле П", &before.p_field, &after.p_field);
    compare(&mut changes, "Цена", &before.price, &after.price);
    compare(&mut changes, "Цена за м²", &before.price_per_sqm, &after.price_per_sqm);
    compare(&mut changes, "Валюта", &before.currency, &after.currency);
    compare(&mut changes, "Статус", &before.status, &after.status);
    compare(&mut changes, "Описание", &before.description, &after.description);
    compare(&mut changes, "Примечания", &before.notes, &after.notes);
    compare(&mut changes, "Ответственный", &before.assigned_to_id, &after.assigned_to_id);
    compare(&mut changes, "Архивный", &before.is_archived, &after.is_archived);
    changes
}

/// History note for an edit, `None` when nothing changed.
pub fn history_notes(changes: &[String]) -> Option<String> {
    if changes.is_empty() {
        None
    } else {
        Some(format!("Изменения: {}", changes.join("; ")))
    }
}
