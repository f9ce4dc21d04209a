//! End to end: compose templates from token spans and render them
//! across a two-shard topology.

use switchyard::{
    compose, DataNode, InsertRow, Placeholder, QuoteStyle, RewriteEngine, RewriteToken, TableMap,
    TargetUnit, Topology, Value,
};

const TOPOLOGY: &str = r#"
    [[data_sources]]
    name = "ds0"
    schema = "db0"
    role = "primary"
    tables = ["orders_0"]

    [[data_sources]]
    name = "ds1"
    schema = "db1"
    role = "replica"
    tables = ["orders_1"]
"#;

fn logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("switchyard=trace")
        .try_init();
}

fn target(data_source: &str, table: &str) -> TargetUnit {
    let mut target = TargetUnit::new(data_source);
    target.add_table(table);
    target
}

fn mapping(actual: &str) -> TableMap {
    let mut tables = TableMap::new();
    tables.insert("orders".into(), actual.into());
    tables
}

#[test]
fn multi_row_insert_split_across_shards() {
    logging();

    let topology = Topology::from_toml(TOPOLOGY).unwrap();

    let sql = "INSERT INTO orders (id, total) VALUES ($1, $2), ($3, $4)";
    let table_token = RewriteToken::new(12, 17, "orders");
    let values_token = RewriteToken::new(19, sql.len() - 1, "orders");

    let rows = vec![
        InsertRow::new(
            vec![Value::Parameter(1), Value::Parameter(2)],
            vec![Value::from(1i64), Value::from(9.99f64)],
        )
        .with_data_nodes(vec![DataNode::new("ds0", "orders_0")]),
        InsertRow::new(
            vec![Value::Parameter(3), Value::Parameter(4)],
            vec![Value::from(2i64), Value::from(19.99f64)],
        )
        .with_data_nodes(vec![DataNode::new("ds1", "orders_1")]),
    ];

    let template = compose(
        sql,
        vec![
            (
                table_token,
                Placeholder::table("orders", QuoteStyle::None),
            ),
            (
                values_token,
                Placeholder::insert_values(vec!["id".into(), "total".into()], rows),
            ),
        ],
    )
    .unwrap();

    let base = vec![
        Value::from(1i64),
        Value::from(9.99f64),
        Value::from(2i64),
        Value::from(19.99f64),
    ];
    let engine = RewriteEngine::new(&template, &base);

    let shard_0 = engine
        .render(
            &target("ds0", "orders_0"),
            &mapping("orders_0"),
            &topology,
            &topology,
        )
        .unwrap();
    assert_eq!(
        shard_0.sql(),
        "INSERT INTO orders_0 (id, total) VALUES ($1, $2)"
    );
    assert_eq!(
        shard_0.parameters(),
        &[Value::from(1i64), Value::from(9.99f64)]
    );

    let shard_1 = engine
        .render(
            &target("ds1", "orders_1"),
            &mapping("orders_1"),
            &topology,
            &topology,
        )
        .unwrap();
    assert_eq!(
        shard_1.sql(),
        "INSERT INTO orders_1 (id, total) VALUES ($3, $4)"
    );
    assert_eq!(
        shard_1.parameters(),
        &[Value::from(2i64), Value::from(19.99f64)]
    );
}

#[test]
fn index_rewrite_with_schema() {
    logging();

    let topology = Topology::from_toml(TOPOLOGY).unwrap();

    let sql = "CREATE INDEX `idx_total` ON `orders` (total)";
    let index_token = RewriteToken::new(13, 23, "`idx_total`");
    let table_token = RewriteToken::new(28, 35, "`orders`");

    let template = compose(
        sql,
        vec![
            (
                index_token,
                Placeholder::index("idx_total", "orders", QuoteStyle::Backtick),
            ),
            (
                table_token,
                Placeholder::table("orders", QuoteStyle::Backtick),
            ),
        ],
    )
    .unwrap();

    let engine = RewriteEngine::new(&template, &[]);
    let output = engine
        .render(
            &target("ds1", "orders_1"),
            &mapping("orders_1"),
            &topology,
            &topology,
        )
        .unwrap();

    assert_eq!(
        output.sql(),
        "CREATE INDEX `idx_total_orders_1` ON `orders_1` (total)"
    );
    assert!(output.parameters().is_empty());
}

#[test]
fn primary_mode_resolves_schema_only() {
    logging();

    let topology = Topology::from_toml(TOPOLOGY).unwrap();

    let sql = "SHOW TABLES FROM logical_db";
    let schema_token = RewriteToken::new(17, 26, "logical_db");

    let template = compose(sql, vec![(schema_token, Placeholder::schema("orders"))]).unwrap();

    let engine = RewriteEngine::new(&template, &[]);
    assert_eq!(
        engine.render_primary(&topology, &topology).unwrap(),
        "SHOW TABLES FROM db0"
    );
}

#[test]
fn unrouted_mode_keeps_every_row() {
    logging();

    let rows = vec![
        InsertRow::new(vec![Value::Parameter(1)], vec![Value::from(1i64)]),
        InsertRow::new(vec![Value::Parameter(2)], vec![Value::from(2i64)]),
    ];

    let sql = "INSERT INTO settings (id) VALUES ($1), ($2)";
    let values_token = RewriteToken::new(21, sql.len() - 1, "settings");

    let template = compose(
        sql,
        vec![(
            values_token,
            Placeholder::insert_values(vec!["id".into()], rows),
        )],
    )
    .unwrap();

    let base = vec![Value::from(1i64), Value::from(2i64)];
    let engine = RewriteEngine::new(&template, &base);

    let output = engine.render_unrouted().unwrap();
    assert_eq!(output.sql(), "INSERT INTO settings (id) VALUES ($1), ($2)");
    assert_eq!(
        output.parameters(),
        &[Value::from(1i64), Value::from(2i64)]
    );
}
