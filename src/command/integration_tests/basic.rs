use std::sync::{Arc, Mutex};

use crate::command::{
    channel::ProcessChannel,
    error::CommandError,
    integration_tests::helper::{sh, within},
    output::TerminationReason,
};

#[tokio::test]
async fn echo_hello() {
    let terminations = Arc::new(Mutex::new(Vec::new()));
    let recorded = terminations.clone();

    let output = within(
        ProcessChannel::new(sh("echo hello"))
            .handle_termination(move |code, reason| {
                recorded.lock().unwrap().push((code, reason));
                Ok(())
            })
            .exec(),
    )
    .await
    .unwrap();

    assert_eq!(output.lines()[0], "hello");
    assert_eq!(output.exit_code, 0);
    assert!(output.stderr.is_empty());
    assert_eq!(
        *terminations.lock().unwrap(),
        vec![(0, TerminationReason::Exit)]
    );
}

#[tokio::test]
async fn large_output_is_reconstructed_exactly() {
    let script = "i=0; while [ $i -lt 3000 ]; do echo \"line $i\"; i=$((i+1)); done";
    let output = within(ProcessChannel::new(sh(script)).exec()).await.unwrap();

    let expected: String = (0..3000).map(|i| format!("line {}\n", i)).collect();
    assert!(expected.len() > 1024 * 10);
    assert_eq!(output.stdout_text(), expected);
}

#[tokio::test]
async fn small_chunk_size_still_reconstructs() {
    let output = within(
        ProcessChannel::new(sh("printf 'abcdefghijklmnopqrstuvwxyz'").read_chunk_size(3)).exec(),
    )
    .await
    .unwrap();
    assert_eq!(output.stdout, b"abcdefghijklmnopqrstuvwxyz");
}

#[tokio::test]
async fn stdout_chunks_arrive_in_order() {
    let chunks = Arc::new(Mutex::new(Vec::new()));
    let seen = chunks.clone();
    let output = within(
        ProcessChannel::new(sh("printf one; sleep 0.1; printf two; sleep 0.1; printf three"))
            .handle_stdout(move |chunk| {
                seen.lock().unwrap().extend_from_slice(chunk);
                Ok(None)
            })
            .exec(),
    )
    .await
    .unwrap();

    assert_eq!(*chunks.lock().unwrap(), b"onetwothree");
    assert_eq!(output.stdout, b"onetwothree");
}

#[tokio::test]
async fn termination_hook_sees_complete_stderr() {
    let stderr = Arc::new(Mutex::new(Vec::new()));
    let collected = stderr.clone();
    let inspected = stderr.clone();

    let script = "i=0; while [ $i -lt 500 ]; do echo \"warn $i\" >&2; i=$((i+1)); done; echo 'bad cred' >&2; exit 1";
    let result = within(
        ProcessChannel::new(sh(script))
            .handle_stderr(move |chunk| {
                collected.lock().unwrap().extend_from_slice(chunk);
                Ok(None)
            })
            .handle_termination(move |code, _reason| {
                let stderr = inspected.lock().unwrap();
                if String::from_utf8_lossy(&stderr).trim_end().ends_with("bad cred") {
                    return Err(CommandError::failed(code, b"bad cred"));
                }
                Ok(())
            })
            .exec(),
    )
    .await;

    assert_eq!(
        result,
        Err(CommandError::Failed {
            exit_code: 1,
            stderr: "bad cred".to_string()
        })
    );
}

#[tokio::test]
async fn nonzero_exit_is_reported_not_raised() {
    let output = within(ProcessChannel::new(sh("echo 'bad cred' >&2; exit 1")).exec())
        .await
        .unwrap();
    assert_eq!(output.exit_code, 1);
    assert_eq!(output.stderr_text(), "bad cred\n");
    assert!(!output.success());
}

#[tokio::test]
async fn signaled_process_reports_signal() {
    let terminations = Arc::new(Mutex::new(Vec::new()));
    let recorded = terminations.clone();
    let output = within(
        ProcessChannel::new(sh("kill -TERM $$"))
            .handle_termination(move |code, reason| {
                recorded.lock().unwrap().push((code, reason));
                Ok(())
            })
            .exec(),
    )
    .await
    .unwrap();

    assert_eq!(output.exit_code, 15);
    assert_eq!(
        *terminations.lock().unwrap(),
        vec![(15, TerminationReason::UncaughtSignal)]
    );
}

#[tokio::test]
async fn environment_can_replace_inherited() {
    let config = sh("echo \"$SECRETCMD_VAULT:$HOME\"")
        .env([("SECRETCMD_VAULT", "work")])
        .inherit_env(false);
    let output = within(ProcessChannel::new(config).exec()).await.unwrap();
    assert_eq!(output.lines()[0], "work:");
}

#[tokio::test]
async fn environment_extends_inherited_by_default() {
    let config = sh("echo \"$SECRETCMD_VAULT\"").env([("SECRETCMD_VAULT", "personal")]);
    let output = within(ProcessChannel::new(config).exec()).await.unwrap();
    assert_eq!(output.lines()[0], "personal");
}

#[tokio::test]
async fn working_dir_is_applied() {
    let output = within(ProcessChannel::new(sh("pwd").working_dir("/")).exec())
        .await
        .unwrap();
    assert_eq!(output.lines()[0], "/");
}

#[tokio::test]
async fn on_launch_runs_once() {
    let launches = Arc::new(Mutex::new(0));
    let counter = launches.clone();
    within(
        ProcessChannel::new(sh("true"))
            .on_launch(move || *counter.lock().unwrap() += 1)
            .exec(),
    )
    .await
    .unwrap();
    assert_eq!(*launches.lock().unwrap(), 1);
}

#[tokio::test]
async fn channels_run_concurrently() {
    let handles: Vec<_> = (0..8)
        .map(|n| {
            tokio::spawn(ProcessChannel::new(sh(&format!("sleep 0.2; echo {}", n))).exec())
        })
        .collect();

    let started = std::time::Instant::now();
    for (n, handle) in handles.into_iter().enumerate() {
        let output = within(handle).await.unwrap().unwrap();
        assert_eq!(output.lines()[0], n.to_string());
    }
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
}
