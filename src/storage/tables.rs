use redb::TableDefinition;

/// Named string slots: slot name -> stored value
pub const SLOTS: TableDefinition<&str, &str> = TableDefinition::new("slots");
