use crate::template::{FieldRecord, TemplateKind};
use crate::ui::Style;

/// Prints every template with its form fields and built-in closing remark.
pub fn print_templates() {
    println!("{}", Style::header("Templates"));
    for kind in TemplateKind::ALL {
        println!(
            "  {:16} {}",
            Style::value(kind.id()),
            kind.display_name()
        );
        println!(
            "    {} {}",
            Style::label("fields "),
            Style::code(FieldRecord::empty(kind).field_names().join(", "))
        );
        println!(
            "    {} {}",
            Style::label("closing"),
            Style::secondary(kind.default_closing_remark())
        );
    }
}
