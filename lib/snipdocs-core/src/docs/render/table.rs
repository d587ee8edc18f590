use super::RenderedSnippet;
use crate::docs::{FieldType, TemplateFormat};

#[derive(Debug, Clone)]
pub(crate) struct FieldRow {
    pub(crate) path: String,
    pub(crate) field_type: FieldType,
    pub(crate) description: String,
}

#[derive(Debug, Clone)]
pub(crate) struct ParameterRow {
    pub(crate) name: String,
    pub(crate) description: String,
}

pub(crate) fn fields_table(
    name: &str,
    rows: &[FieldRow],
    format: TemplateFormat,
) -> RenderedSnippet {
    let rows = rows
        .iter()
        .map(|row| {
            vec![
                code(format, &row.path),
                row.field_type.to_string(),
                row.description.clone(),
            ]
        })
        .collect::<Vec<_>>();
    let content = table(format, &["Path", "Type", "Description"], &rows);
    RenderedSnippet::new(name, format, content)
}

pub(crate) fn parameters_table(
    name: &str,
    title: Option<&str>,
    rows: &[ParameterRow],
    format: TemplateFormat,
) -> RenderedSnippet {
    let rows = rows
        .iter()
        .map(|row| vec![code(format, &row.name), row.description.clone()])
        .collect::<Vec<_>>();

    let mut content = String::new();
    if let Some(title) = title {
        match format {
            TemplateFormat::Asciidoctor => content.push_str(&format!(".+{title}+\n")),
            TemplateFormat::Markdown => content.push_str(&format!("`{title}`\n\n")),
        }
    }
    content.push_str(&table(format, &["Parameter", "Description"], &rows));
    RenderedSnippet::new(name, format, content)
}

fn table(format: TemplateFormat, headers: &[&str], rows: &[Vec<String>]) -> String {
    match format {
        TemplateFormat::Asciidoctor => {
            let mut result = String::from("|===\n");
            for header in headers {
                result.push('|');
                result.push_str(header);
            }
            result.push('\n');
            for row in rows {
                result.push('\n');
                for cell in row {
                    result.push('|');
                    result.push_str(&escape(cell));
                    result.push('\n');
                }
            }
            result.push_str("\n|===\n");
            result
        }
        TemplateFormat::Markdown => {
            let mut lines = vec![
                headers.join(" | "),
                headers
                    .iter()
                    .map(|header| "-".repeat(header.len()))
                    .collect::<Vec<_>>()
                    .join(" | "),
            ];
            for row in rows {
                lines.push(
                    row.iter()
                        .map(|cell| escape(cell))
                        .collect::<Vec<_>>()
                        .join(" | "),
                );
            }
            lines.join("\n") + "\n"
        }
    }
}

fn code(format: TemplateFormat, value: &str) -> String {
    match format {
        TemplateFormat::Asciidoctor => format!("`+{value}+`"),
        TemplateFormat::Markdown => format!("`{value}`"),
    }
}

fn escape(cell: &str) -> String {
    cell.replace('|', r"\|")
}
