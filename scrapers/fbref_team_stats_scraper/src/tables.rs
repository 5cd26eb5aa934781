use scraper::{ElementRef, Html, Node, Selector};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("no tables found on page")]
    NoTables,
    #[error("table `{0}` not found on page")]
    MissingTable(String),
    #[error("column {column} not found in table `{table}`")]
    MissingColumn { table: String, column: String },
    #[error("squad `{squad}` appears more than once in table `{table}`")]
    DuplicateSquad { table: String, squad: String },
    #[error("invalid number `{value}` in column {column} of table `{table}`")]
    InvalidNumber {
        table: String,
        column: String,
        value: String,
    },
}

/// Two-level column header. `group` is the over-header label, `None` when the
/// column sits under a blank over-header or the table has a single header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnKey {
    pub group: Option<String>,
    pub name: String,
}

impl ColumnKey {
    pub fn new(group: Option<&str>, name: &str) -> Self {
        Self {
            group: group.map(str::to_string),
            name: name.to_string(),
        }
    }
}

impl std::fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.group {
            Some(group) => write!(f, "({}, {})", group, self.name),
            None => write!(f, "({})", self.name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub id: Option<String>,
    pub caption: Option<String>,
    pub columns: Vec<ColumnKey>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, key: &ColumnKey) -> Option<usize> {
        self.columns.iter().position(|column| column == key)
    }

    /// Identifier used in error messages.
    pub fn label(&self) -> String {
        self.id
            .clone()
            .or_else(|| self.caption.clone())
            .unwrap_or_else(|| "<unnamed>".to_string())
    }
}

/// All tables of one page, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageTables {
    tables: Vec<RawTable>,
}

impl PageTables {
    pub fn new(tables: Vec<RawTable>) -> Self {
        Self { tables }
    }

    /// Parses every `<table>` in the document, followed by tables that the
    /// page ships inside HTML comments.
    pub fn from_html(html: &str) -> Result<Self, TableError> {
        let document = Html::parse_document(html);
        let mut tables = parse_tables(&document);

        let commented: Vec<String> = document
            .tree
            .root()
            .descendants()
            .filter_map(|node| match node.value() {
                Node::Comment(comment) if comment.comment.contains("<table") => {
                    Some(comment.comment.to_string())
                }
                _ => None,
            })
            .collect();
        for fragment in commented {
            let fragment = Html::parse_fragment(&fragment);
            tables.extend(parse_tables(&fragment));
        }

        if tables.is_empty() {
            return Err(TableError::NoTables);
        }
        debug!("Parsed {} tables from page", tables.len());
        Ok(Self { tables })
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&RawTable> {
        self.tables.get(position)
    }

    pub fn tables(&self) -> &[RawTable] {
        &self.tables
    }

    pub fn has_identifiers(&self) -> bool {
        self.tables.iter().any(|table| table.id.is_some())
    }

    pub fn find<P>(&self, mut predicate: P) -> Option<&RawTable>
    where
        P: FnMut(&str) -> bool,
    {
        self.tables
            .iter()
            .find(|table| table.id.as_deref().map_or(false, &mut predicate))
    }
}

fn parse_tables(document: &Html) -> Vec<RawTable> {
    let table_selector = Selector::parse("table").unwrap();
    document
        .select(&table_selector)
        .map(parse_table)
        .collect()
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn colspan(cell: &ElementRef) -> usize {
    cell.value()
        .attr("colspan")
        .and_then(|span| span.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1)
}

fn is_header_row(row: &ElementRef) -> bool {
    row.value()
        .attr("class")
        .map(|class| {
            class
                .split_whitespace()
                .any(|c| c == "thead" || c == "over_header" || c == "spacer")
        })
        .unwrap_or(false)
}

fn parse_table(table: ElementRef) -> RawTable {
    let caption_selector = Selector::parse("caption").unwrap();
    let head_row_selector = Selector::parse("thead tr").unwrap();
    let body_row_selector = Selector::parse("tbody tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    let id = table.value().attr("id").map(str::to_string);
    let caption = table
        .select(&caption_selector)
        .next()
        .map(|el| cell_text(&el))
        .filter(|text| !text.is_empty());

    let head_rows: Vec<ElementRef> = table.select(&head_row_selector).collect();
    let columns = match head_rows.as_slice() {
        [] => Vec::new(),
        [names] => names
            .select(&cell_selector)
            .map(|cell| ColumnKey::new(None, &cell_text(&cell)))
            .collect(),
        [.., groups, names] => {
            let mut expanded = Vec::new();
            for cell in groups.select(&cell_selector) {
                let text = cell_text(&cell);
                let group = if text.is_empty() { None } else { Some(text) };
                expanded.extend(std::iter::repeat(group).take(colspan(&cell)));
            }
            names
                .select(&cell_selector)
                .enumerate()
                .map(|(i, cell)| ColumnKey {
                    group: expanded.get(i).cloned().flatten(),
                    name: cell_text(&cell),
                })
                .collect()
        }
    };

    let rows = table
        .select(&body_row_selector)
        .filter(|row| !is_header_row(row))
        .map(|row| row.select(&cell_selector).map(|cell| cell_text(&cell)).collect())
        .collect();

    RawTable {
        id,
        caption,
        columns,
        rows,
    }
}
