use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    command::error::CommandError,
    recipe::{Recipe, RecipeExt, unit_tests::helper::AddRecipe, unsupported::UnsupportedRecipe},
};

#[tokio::test]
async fn always_fails_with_reason() {
    let recipe = UnsupportedRecipe::<i64, i64>::new("Deleting entries is not supported");
    assert_eq!(recipe.reason(), "Deleting entries is not supported");
    for input in [0, 1, -1] {
        assert_eq!(
            recipe.transform(input).await,
            Err(CommandError::Unsupported {
                reason: "Deleting entries is not supported".to_string()
            })
        );
    }
}

#[tokio::test]
async fn stops_a_pipeline() {
    let after = AddRecipe::new(1);
    let calls: Arc<AtomicUsize> = after.calls.clone();
    let pipeline = UnsupportedRecipe::<i64, i64>::new("nope").then(after);
    assert!(pipeline.transform(1).await.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn error_message_is_human_readable() {
    let error = CommandError::unsupported("This tool cannot rename accounts");
    assert_eq!(
        error.to_string(),
        "Unsupported operation: This tool cannot rename accounts"
    );
}
