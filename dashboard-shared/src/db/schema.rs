/// Dashboard table definitions
///
/// Every statement is idempotent (`IF NOT EXISTS`), so the schema can be
/// re-applied at the start of each seeding transaction. There are no
/// foreign keys: `invoices.customer_id` is not checked against `customers`.
///
/// ```sql
/// users     (id UUID PK, name, email UNIQUE, password)
/// invoices  (id UUID PK, customer_id UUID, amount INT, status, date DATE)
/// customers (id UUID PK, name, email, image_url)
/// revenue   (month VARCHAR(4) UNIQUE, revenue INT)
/// ```

use crate::db::Statement;

/// Provides `uuid_generate_v4()` for the id column defaults
pub const CREATE_UUID_EXTENSION: &str = r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp""#;

pub const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )
"#;

pub const CREATE_INVOICES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS invoices (
        id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
        customer_id UUID NOT NULL,
        amount INT NOT NULL,
        status VARCHAR(255) NOT NULL,
        date DATE NOT NULL
    )
"#;

pub const CREATE_CUSTOMERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS customers (
        id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        image_url VARCHAR(255) NOT NULL
    )
"#;

pub const CREATE_REVENUE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS revenue (
        month VARCHAR(4) NOT NULL UNIQUE,
        revenue INT NOT NULL
    )
"#;

/// Schema statements in execution order: the extension first, then the tables
pub fn schema_statements() -> Vec<Statement> {
    [
        CREATE_UUID_EXTENSION,
        CREATE_USERS_TABLE,
        CREATE_INVOICES_TABLE,
        CREATE_CUSTOMERS_TABLE,
        CREATE_REVENUE_TABLE,
    ]
    .into_iter()
    .map(Statement::new)
    .collect()
}
