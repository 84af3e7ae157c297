use mysql_middleware::prelude::*;
use mysql_middleware::test_utils::scripted;
use mysql_middleware::MAX_RECONNECT_ATTEMPTS;

#[test]
fn failed_probe_replaces_the_session_and_the_call_still_runs()
-> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (state, connector) = scripted();
        let mut client = MysqlClient::with_connector(Box::new(connector), 10_000).await?;
        state.lock().unwrap().fail_next_pings = 1;

        client.truncate("t").await?;

        let state = state.lock().unwrap();
        // Initial open plus one replacement after the dead probe.
        assert_eq!(state.connects, 2);
        assert_eq!(state.closes, 1);
        assert_eq!(state.statements, vec!["TRUNCATE TABLE t"]);
        Ok::<(), MysqlMiddlewareError>(())
    })?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn reconnect_gives_up_after_the_attempt_budget() {
    let (state, connector) = scripted();
    let mut client = MysqlClient::with_connector(Box::new(connector), 10_000)
        .await
        .expect("initial connect");
    {
        let mut state = state.lock().unwrap();
        state.fail_next_pings = 1;
        state.fail_connects = u32::MAX;
    }

    let err = client.truncate("t").await.expect_err("must give up");
    match err {
        MysqlMiddlewareError::ConnectionGaveUp { attempts } => {
            assert_eq!(attempts, MAX_RECONNECT_ATTEMPTS);
        }
        other => panic!("expected ConnectionGaveUp, got {other:?}"),
    }

    assert_eq!(client.link_state(), LinkState::Failed);
    let state = state.lock().unwrap();
    // Initial open plus the full reconnect budget, then no more.
    assert_eq!(state.connects, 1 + MAX_RECONNECT_ATTEMPTS as usize);
    assert!(state.statements.is_empty());
}

#[tokio::test(start_paused = true)]
async fn a_later_probe_can_recover_a_failed_link() {
    let (state, connector) = scripted();
    let mut client = MysqlClient::with_connector(Box::new(connector), 10_000)
        .await
        .expect("initial connect");
    {
        let mut state = state.lock().unwrap();
        state.fail_next_pings = 1;
        state.fail_connects = u32::MAX;
    }
    client.truncate("t").await.expect_err("budget exhausted");

    state.lock().unwrap().fail_connects = 0;
    client.truncate("t").await.expect("link recovered");
    assert_eq!(client.link_state(), LinkState::Connected);
}
