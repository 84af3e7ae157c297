use mysql_middleware::prelude::*;
use mysql_middleware::test_utils::{make_result_set, scripted};

#[test]
fn kwargs_shape_insert_builds_one_parenthesized_statement() -> Result<(), Box<dyn std::error::Error>>
{
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (state, connector) = scripted();
        let mut client = MysqlClient::with_connector(Box::new(connector), 10_000).await?;

        client
            .insert(
                "drug_html",
                &[RowSpec::fields([
                    ("key_id", Value::Text("123456789111".into())),
                    ("str_len", Value::Int(20)),
                ])],
            )
            .await?;

        let state = state.lock().unwrap();
        assert_eq!(
            state.statements,
            vec!["INSERT INTO `drug_html` (`key_id`,`str_len`) VALUES ('123456789111',20);"]
        );
        assert_eq!(state.commits, 1);
        Ok::<(), MysqlMiddlewareError>(())
    })?;
    Ok(())
}

#[test]
fn positional_rows_introspect_columns_and_compose_multi_row_values()
-> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (state, connector) = scripted();
        state.lock().unwrap().query_results.push_back(make_result_set(
            &["COLUMN_NAME"],
            vec![
                vec![Value::Text("c1".into())],
                vec![Value::Text("c2".into())],
            ],
        ));
        let mut client = MysqlClient::with_connector(Box::new(connector), 10_000).await?;

        client
            .insert(
                "t",
                &[
                    RowSpec::values([Value::Int(1), Value::Text("a".into())]),
                    RowSpec::values([Value::Int(2), Value::Text("b".into())]),
                ],
            )
            .await?;

        let state = state.lock().unwrap();
        assert_eq!(
            state.statements,
            vec![
                "SELECT COLUMN_NAME FROM information_schema.COLUMNS \
                 WHERE table_name = 't' ORDER BY ORDINAL_POSITION",
                "INSERT INTO `t` (`c1`,`c2`) VALUES (1,'a'),(2,'b');",
            ]
        );
        Ok::<(), MysqlMiddlewareError>(())
    })?;
    Ok(())
}

#[test]
fn multiple_single_field_rows_parenthesize_every_statement()
-> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (state, connector) = scripted();
        state.lock().unwrap().query_results.push_back(make_result_set(
            &["COLUMN_NAME"],
            vec![vec![Value::Text("id".into())]],
        ));
        let mut client = MysqlClient::with_connector(Box::new(connector), 10_000).await?;

        client
            .insert(
                "t",
                &[
                    RowSpec::fields([("id", Value::Int(1))]),
                    RowSpec::fields([("id", Value::Int(2))]),
                ],
            )
            .await?;
        client
            .insert(
                "t",
                &[
                    RowSpec::values([Value::Int(3)]),
                    RowSpec::fields([("id", Value::Int(4))]),
                ],
            )
            .await?;

        let state = state.lock().unwrap();
        assert_eq!(
            state.statements,
            vec![
                "INSERT INTO `t` (`id`) VALUES (1);",
                "INSERT INTO `t` (`id`) VALUES (2);",
                "SELECT COLUMN_NAME FROM information_schema.COLUMNS \
                 WHERE table_name = 't' ORDER BY ORDINAL_POSITION",
                "INSERT INTO `t` (`id`) VALUES (3);",
                "INSERT INTO `t` (`id`) VALUES (4);",
            ]
        );
        Ok::<(), MysqlMiddlewareError>(())
    })?;
    Ok(())
}

#[test]
fn insert_ignore_replace_delete_truncate_statement_forms()
-> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (state, connector) = scripted();
        let mut client = MysqlClient::with_connector(Box::new(connector), 10_000).await?;

        client
            .insert_ignore("t", &[RowSpec::fields([("id", Value::Int(1))])])
            .await?;
        client
            .replace(
                "t",
                &[RowSpec::fields([
                    ("id", Value::Int(1)),
                    ("name", Value::Text("b".into())),
                ])],
            )
            .await?;
        client
            .delete("t", &[RowSpec::fields([("id", Value::Int(1))])])
            .await?;
        client.truncate("t").await?;

        let state = state.lock().unwrap();
        assert_eq!(
            state.statements,
            vec![
                "INSERT IGNORE INTO `t` `id` VALUES 1;",
                "REPLACE INTO `t` (`id`,`name`) VALUES (1,'b');",
                "DELETE FROM `t` WHERE `id` = 1;",
                "TRUNCATE TABLE t",
            ]
        );
        assert_eq!(state.commits, 4);
        Ok::<(), MysqlMiddlewareError>(())
    })?;
    Ok(())
}

#[test]
fn affected_row_count_comes_back_from_the_session() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (state, connector) = scripted();
        state.lock().unwrap().affected = 3;
        let mut client = MysqlClient::with_connector(Box::new(connector), 10_000).await?;

        let affected = client
            .delete("t", &[RowSpec::fields([("kind", Value::Text("old".into()))])])
            .await?;
        assert_eq!(affected, 3);
        Ok::<(), MysqlMiddlewareError>(())
    })?;
    Ok(())
}
