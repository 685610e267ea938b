use anyhow::Result;

use crate::store::{ProfileStore, SqliteStore};
use crate::template::{ClosingRemarkTable, TemplateKind};
use crate::ui::Style;

/// Lists closing remarks, or shows, sets or resets the one for `template`.
pub fn run_remarks(template: Option<&str>, text: Option<&str>, reset: bool) -> Result<()> {
    let store = ProfileStore::new(SqliteStore::new()?);
    let mut remarks = store.load_closing_remarks();

    let Some(template) = template else {
        print_remarks(&remarks, &TemplateKind::ALL);
        return Ok(());
    };
    let kind: TemplateKind = template.parse()?;

    if reset {
        remarks.reset(kind);
        store.save_closing_remarks(&remarks);
        println!("{} Restored the built-in closing remark", Style::success("✓"));
    } else if let Some(text) = text {
        remarks.set(kind, text);
        store.save_closing_remarks(&remarks);
        println!("{} Closing remark saved", Style::success("✓"));
    }

    print_remarks(&remarks, &[kind]);
    Ok(())
}

fn print_remarks(remarks: &ClosingRemarkTable, kinds: &[TemplateKind]) {
    println!("{}", Style::header("Closing remarks"));
    for &kind in kinds {
        let marker = if remarks.is_customized(kind) {
            Style::warning("(custom)")
        } else {
            Style::default_marker()
        };
        println!("  {:16} {marker}", Style::value(kind.id()));
        println!("    {}", remarks.get(kind));
    }
}
