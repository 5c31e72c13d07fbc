use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    command::{error::CommandError, output::Output},
    recipe::{
        Recipe, RecipeExt, command::CommandRecipe, retry::RetryPolicy,
        unit_tests::helper::ScriptedCommand,
    },
};

fn first_line(output: Output) -> Result<String, CommandError> {
    if !output.success() {
        return Err(CommandError::failed(output.exit_code, &output.stderr));
    }
    Ok(output.lines()[0].clone())
}

#[tokio::test]
async fn returns_parsed_value() {
    let command = ScriptedCommand::stdout("hello\n");
    let recipe = CommandRecipe::new(
        {
            let command = command.clone();
            move |_: &()| Ok(command.clone())
        },
        first_line,
    );

    assert_eq!(recipe.transform(()).await, Ok("hello".to_string()));
    assert_eq!(command.count(), 1);
}

#[tokio::test]
async fn retries_until_parse_succeeds() {
    let command = ScriptedCommand::stdout("ready\n");
    let parses = Arc::new(AtomicUsize::new(0));
    let recoveries = Arc::new(AtomicUsize::new(0));

    let recipe = CommandRecipe::new(
        {
            let command = command.clone();
            move |_: &()| Ok(command.clone())
        },
        {
            let parses = parses.clone();
            move |output| {
                if parses.fetch_add(1, Ordering::SeqCst) < 2 {
                    return Err(CommandError::Parse("not yet".to_string()));
                }
                first_line(output)
            }
        },
    )
    .recover({
        let recoveries = recoveries.clone();
        move |_| {
            recoveries.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });

    assert_eq!(recipe.transform(()).await, Ok("ready".to_string()));
    assert_eq!(command.count(), 3);
    assert_eq!(recoveries.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failing_recovery_stops_retries() {
    let command = ScriptedCommand::new(Ok(Output::new(Vec::new(), b"bad cred\n".to_vec(), 1)));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let recipe = CommandRecipe::new(
        {
            let command = command.clone();
            move |_: &()| Ok(command.clone())
        },
        first_line,
    )
    .recover({
        let seen = seen.clone();
        move |error| {
            seen.lock().unwrap().push(error.clone());
            Err(error)
        }
    });

    let expected = CommandError::Failed {
        exit_code: 1,
        stderr: "bad cred".to_string(),
    };
    assert_eq!(recipe.transform(()).await, Err(expected.clone()));
    assert_eq!(command.count(), 1);
    assert_eq!(*seen.lock().unwrap(), vec![expected]);
}

#[tokio::test]
async fn default_recovery_propagates() {
    let command = ScriptedCommand::stdout("garbage");
    let recipe = CommandRecipe::new(
        {
            let command = command.clone();
            move |_: &()| Ok(command.clone())
        },
        |_| Err::<(), _>(CommandError::Parse("unexpected output".to_string())),
    );

    assert_eq!(
        recipe.transform(()).await,
        Err(CommandError::Parse("unexpected output".to_string()))
    );
    assert_eq!(command.count(), 1);
}

#[tokio::test]
async fn limited_policy_gives_up() {
    let command = ScriptedCommand::stdout("garbage");
    let recoveries = Arc::new(AtomicUsize::new(0));
    let recipe = CommandRecipe::new(
        {
            let command = command.clone();
            move |_: &()| Ok(command.clone())
        },
        |_| Err::<(), _>(CommandError::Parse("locked".to_string())),
    )
    .recover({
        let recoveries = recoveries.clone();
        move |_| {
            recoveries.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    })
    .retry_policy(RetryPolicy::limited(4));

    assert_eq!(
        recipe.transform(()).await,
        Err(CommandError::RetriesExhausted {
            attempts: 4,
            last: Box::new(CommandError::Parse("locked".to_string())),
        })
    );
    assert_eq!(command.count(), 4);
    assert_eq!(recoveries.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn exec_error_skips_recovery() {
    let command = ScriptedCommand::new(Err(CommandError::IO("spawn failed".to_string())));
    let recoveries = Arc::new(AtomicUsize::new(0));
    let recipe = CommandRecipe::new(
        {
            let command = command.clone();
            move |_: &()| Ok(command.clone())
        },
        first_line,
    )
    .recover({
        let recoveries = recoveries.clone();
        move |_| {
            recoveries.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });

    assert_eq!(
        recipe.transform(()).await,
        Err(CommandError::IO("spawn failed".to_string()))
    );
    assert_eq!(command.count(), 1);
    assert_eq!(recoveries.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn build_error_runs_nothing() {
    let command = ScriptedCommand::stdout("unused");
    let recipe = CommandRecipe::new(
        |id: &String| {
            if id.is_empty() {
                return Err(CommandError::InvalidConfiguration(
                    "Identifier cannot be empty".to_string(),
                ));
            }
            Ok(ScriptedCommand::stdout("unused"))
        },
        first_line,
    );

    assert!(matches!(
        recipe.transform(String::new()).await,
        Err(CommandError::InvalidConfiguration(_))
    ));
    assert_eq!(command.count(), 0);
}

#[tokio::test]
async fn builds_command_from_input() {
    let recipe = CommandRecipe::new(
        |id: &String| Ok(ScriptedCommand::stdout(&format!("secret-for-{}\n", id))),
        first_line,
    )
    .into_any();

    assert_eq!(
        recipe.transform("github".to_string()).await,
        Ok("secret-for-github".to_string())
    );
}

#[test]
fn retry_policy_bounds() {
    assert!(RetryPolicy::Unbounded.allows_retry(usize::MAX - 1));
    assert!(RetryPolicy::limited(3).allows_retry(2));
    assert!(!RetryPolicy::limited(3).allows_retry(3));
    assert!(!RetryPolicy::limited(0).allows_retry(0));
    assert_eq!(RetryPolicy::default(), RetryPolicy::Unbounded);
}
