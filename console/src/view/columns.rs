//! Column definitions for the roster table.
//!
//! The table-grid widget itself is an external collaborator; the core only
//! describes what it should render.

/// One column of the roster table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Record field (or action slot) the column renders.
    pub field: &'static str,
    /// Header label shown to the operator.
    pub header: &'static str,
    /// Rendering width hint, in pixels.
    pub width: u16,
}

/// The roster table columns, in display order.
pub const ROSTER_COLUMNS: [ColumnSpec; 5] = [
    ColumnSpec {
        field: "employeeId",
        header: "Employee ID",
        width: 250,
    },
    ColumnSpec {
        field: "name",
        header: "Name",
        width: 200,
    },
    ColumnSpec {
        field: "trade",
        header: "Trade",
        width: 150,
    },
    ColumnSpec {
        field: "logout",
        header: "Logout",
        width: 120,
    },
    ColumnSpec {
        field: "actions",
        header: "Actions",
        width: 120,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_columns_come_before_action_columns() {
        let fields: Vec<&str> = ROSTER_COLUMNS.iter().map(|column| column.field).collect();
        assert_eq!(
            fields,
            vec!["employeeId", "name", "trade", "logout", "actions"]
        );
    }
}
