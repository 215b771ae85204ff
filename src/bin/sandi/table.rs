use std::fmt::{self, Display};
use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

/// Write `rows` as a header, a divider, and one aligned line per row.
pub fn display_table<Row: TableDisplay>(rows: &[Row], mut output: impl Write) -> io::Result<()> {
    let column_count = Row::columns();
    let mut column_widths = (0..column_count)
        .map(|column_index| Row::column_name(column_index).width())
        .collect::<Vec<_>>();

    for row in rows {
        for (column_index, width) in column_widths.iter_mut().enumerate() {
            *width = std::cmp::max(row.item(column_index).width(), *width);
        }
    }

    output_row(&mut output, column_count, |column_index| {
        Padded(Row::column_name(column_index), column_widths[column_index])
    })?;
    output_row(&mut output, column_count, |column_index| {
        Divider(column_widths[column_index])
    })?;
    for row in rows {
        output_row(&mut output, column_count, |column_index| {
            Padded(row.item(column_index), column_widths[column_index])
        })?;
    }

    Ok(())
}

pub trait TableDisplay {
    fn columns() -> usize;
    fn column_name(column_index: usize) -> &'static str;
    fn item(&self, column_index: usize) -> &str;
}

fn output_row<F, D>(
    mut output: impl Write,
    column_count: usize,
    get_column_display: F,
) -> io::Result<()>
where
    D: Display,
    F: Fn(usize) -> D,
{
    for column_index in 0..column_count {
        if column_index > 0 {
            write!(&mut output, "  ")?;
        }
        write!(&mut output, "{}", get_column_display(column_index))?;
    }
    writeln!(&mut output)?;
    Ok(())
}

struct Divider(usize);

impl Display for Divider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            write!(f, "─")?;
        }
        Ok(())
    }
}

struct Padded<'a>(&'a str, usize);

impl Display for Padded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Callers size every column to at least its widest cell.
        let padding = self.1.saturating_sub(self.0.width());
        write!(f, "{}", self.0)?;
        for _ in 0..padding {
            write!(f, " ")?;
        }
        Ok(())
    }
}
