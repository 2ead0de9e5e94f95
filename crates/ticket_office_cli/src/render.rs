//! Plain-text rendering of the selector, table and form.

use std::fmt::Write;
use ticket_office_core::{EntityKind, FieldInput, Form, FormController, RecordStore, ID_KEY};

pub fn kinds(selected: EntityKind) -> String {
    EntityKind::ALL
        .iter()
        .map(|kind| {
            if *kind == selected {
                format!("[{kind}]")
            } else {
                kind.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn table<S: RecordStore>(controller: &FormController<S>) -> String {
    let columns: Vec<&str> = std::iter::once(ID_KEY)
        .chain(controller.descriptor().keys())
        .collect();
    let cells: Vec<Vec<String>> = controller
        .rows()
        .iter()
        .map(|row| columns.iter().map(|key| row.display_value(key)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            cells
                .iter()
                .map(|row| row[index].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, columns.iter().copied(), &widths);
    for row in &cells {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    if cells.is_empty() {
        out.push_str("(no records)\n");
    }
    out
}

pub fn form(form: &Form) -> String {
    let mut out = format!("new {}:\n", form.kind().label());
    for (index, field) in form.fields().iter().enumerate() {
        let number = index + 1;
        let _ = match &field.input {
            FieldInput::Text(text) => {
                writeln!(out, "  {number}. {}: {text}", field.spec.label)
            }
            FieldInput::Choice { options, selected } => {
                let listed = options
                    .iter()
                    .enumerate()
                    .map(|(option, value)| {
                        let marker = if Some(option) == *selected { "*" } else { "" };
                        format!("{}){marker}{value}", option + 1)
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(out, "  {number}. {}: [{listed}]", field.spec.label)
            }
        };
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}
