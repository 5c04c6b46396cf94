use tabled::{settings::Style, Table, Tabled};

use crate::store::StoreStats;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Table")]
    pub table: String,
    #[tabled(rename = "Rows")]
    pub rows: usize,
    #[tabled(rename = "File")]
    pub file: String,
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, table: &str, rows: usize) {
        self.rows.push(TableRow {
            table: table.to_string(),
            rows,
            file: format!("{}.json", table),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

/// Row counts of every table, in load order
pub fn stats_table(stats: &StoreStats) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("breweries", stats.breweries);
    builder.add_row("beers", stats.beers);
    builder.add_row("users", stats.users);
    builder.add_row("reviews", stats.reviews);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_is_blank() {
        assert!(TableBuilder::new().build().is_empty());
    }

    #[test]
    fn test_stats_table_lists_every_table() {
        let stats = StoreStats {
            breweries: 2,
            beers: 3,
            users: 1,
            reviews: 12,
        };
        let rendered = stats_table(&stats);
        assert!(rendered.contains("reviews.json"));
        assert!(rendered.contains("12"));
        assert!(rendered.contains("breweries"));
    }
}
