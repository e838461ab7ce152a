//! The compilation buffer and its immutable result.

use std::fmt;

use crate::value::SqlValue;

/// Output buffer of one compilation: SQL text plus the arguments bound so far.
///
/// A builder is owned by a single compilation call; dialect methods and
/// extensions append to it in rendering order.
#[derive(Debug, Default)]
pub struct SqlBuilder {
    sql: String,
    arguments: Vec<SqlValue>,
}

impl SqlBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sql: String::new(),
            arguments: vec![],
        }
    }

    /// Appends raw SQL text.
    pub fn push_str(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Appends one character.
    pub fn push(&mut self, c: char) -> &mut Self {
        self.sql.push(c);
        self
    }

    /// Binds an argument. The caller is responsible for the placeholder.
    pub fn push_argument(&mut self, value: SqlValue) -> &mut Self {
        self.arguments.push(value);
        self
    }

    /// Returns the SQL text built so far.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the arguments bound so far.
    #[must_use]
    pub fn arguments(&self) -> &[SqlValue] {
        &self.arguments
    }

    /// Finishes the compilation.
    #[must_use]
    pub fn build(self) -> SqlStatement {
        SqlStatement {
            sql: self.sql,
            arguments: self.arguments,
        }
    }
}

/// A compiled statement: SQL text and its positional arguments.
///
/// Arguments are ordered as their `?` placeholders appear in the text.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    sql: String,
    arguments: Vec<SqlValue>,
}

impl SqlStatement {
    /// Returns the SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the positional arguments.
    #[must_use]
    pub fn arguments(&self) -> &[SqlValue] {
        &self.arguments
    }

    /// Splits the statement into its SQL text and arguments.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.arguments)
    }

    /// Counts `?` placeholders outside quoted strings and identifiers.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        let mut count = 0;
        scan(&self.sql, |piece| {
            if matches!(piece, Piece::Placeholder) {
                count += 1;
            }
        });
        count
    }

    /// Returns the SQL text with every argument inlined, escaped.
    ///
    /// **Warning**: Only meant for logging and debugging. Execute the
    /// statement with its bound arguments.
    #[must_use]
    pub fn to_inline_sql(&self) -> String {
        let mut inline = String::with_capacity(self.sql.len());
        let mut arguments = self.arguments.iter();
        scan(&self.sql, |piece| match piece {
            Piece::Text(c) => inline.push(c),
            Piece::Placeholder => match arguments.next() {
                Some(value) => inline.push_str(&value.to_sql_inline()),
                None => inline.push('?'),
            },
        });
        inline
    }
}

enum Piece {
    Text(char),
    Placeholder,
}

/// Splits `sql` into text and unquoted `?` placeholders.
fn scan(sql: &str, mut visit: impl FnMut(Piece)) {
    let mut quote: Option<char> = None;
    for c in sql.chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                visit(Piece::Text(c));
            }
            None => match c {
                '\'' | '"' | '`' => {
                    quote = Some(c);
                    visit(Piece::Text(c));
                }
                '?' => visit(Piece::Placeholder),
                _ => visit(Piece::Text(c)),
            },
        }
    }
}

impl fmt::Display for SqlStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
