use crate::constants::{DEFAULT_ITEM_GAP, DEFAULT_LAYOUT_COLUMNS, DEFAULT_PAGE_HEIGHT};
use serde::{Deserialize, Serialize};

/// Printable area of one paper page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub page_height: f32,
    pub columns: usize,
    pub item_gap: f32, // vertical space between two items in a column
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_height: DEFAULT_PAGE_HEIGHT,
            columns: DEFAULT_LAYOUT_COLUMNS,
            item_gap: DEFAULT_ITEM_GAP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// index into the input heights
    pub item: usize,
    pub top: f32,
    /// item is taller than a column and will be cut when printed
    pub overflow: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Page {
    pub columns: Vec<Vec<Placement>>,
}

impl Page {
    pub fn item_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }
}

/// Greedy page fill: items keep their order, each goes into the current
/// column if it fits, otherwise the next column, otherwise a new page.
pub fn paginate(heights: &[f32], layout: &PageLayout) -> Vec<Page> {
    let columns = layout.columns.max(1);
    let mut pages: Vec<Page> = Vec::new();
    let mut page = Page {
        columns: vec![Vec::new(); columns],
    };
    let mut col = 0;
    let mut cursor = 0.0f32;

    for (item, &height) in heights.iter().enumerate() {
        let empty = page.columns[col].is_empty();
        let top = if empty { 0.0 } else { cursor + layout.item_gap };

        if !empty && top + height > layout.page_height {
            col += 1;
            if col == columns {
                pages.push(std::mem::replace(
                    &mut page,
                    Page {
                        columns: vec![Vec::new(); columns],
                    },
                ));
                col = 0;
            }
            page.columns[col].push(Placement {
                item,
                top: 0.0,
                overflow: height > layout.page_height,
            });
            cursor = height;
            continue;
        }

        page.columns[col].push(Placement {
            item,
            top,
            overflow: height > layout.page_height,
        });
        cursor = top + height;
    }

    if page.item_count() > 0 {
        pages.push(page);
    }
    pages
}
