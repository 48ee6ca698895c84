//! Block pipeline behavior: parallel decode into one document, one error
//! per failing block, and cooperative cancellation.

use tagdoc::{parse, Block, CancelToken, Entry, ErrorKind};

fn param_block(uri: &str, line: usize, name: &str) -> Block {
    Block::new(
        uri,
        line,
        format!(r#"<param name="{name}" type="string" summary="{name}"/>"#),
    )
}

#[tokio::test]
async fn decodes_blocks_and_isolates_errors() {
    let blocks = vec![
        param_block("mem:a.c", 10, "alpha"),
        Block::new(
            "mem:b.c",
            20,
            r#"<Request type="object" mimetype="json"></Request>"#,
        ),
        Block::new(
            "mem:c.c",
            30,
            r#"<callback method="GET"><request mimetype="json" type="string"/></callback>"#,
        ),
    ];

    let (document, errors) = parse(blocks, CancelToken::new()).await;

    assert_eq!(document.len(), 2);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), ErrorKind::Required);
    assert_eq!(errors[0].field(), "/Request/param");
    assert_eq!(errors[0].location().uri, "mem:b.c");
}

#[tokio::test]
async fn aggregates_many_independent_blocks() {
    let blocks: Vec<Block> = (0..32)
        .map(|i| param_block("mem:many.c", i * 3, &format!("p{i}")))
        .collect();

    let (document, errors) = parse(blocks, CancelToken::new()).await;

    assert!(errors.is_empty());
    assert_eq!(document.len(), 32);
    let mut names: Vec<String> = document
        .entries
        .iter()
        .map(|entry| match entry {
            Entry::Param(p) => p.name.clone(),
            other => panic!("unexpected entry {other:?}"),
        })
        .collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 32);
}

#[tokio::test]
async fn pre_cancelled_token_schedules_nothing() {
    let token = CancelToken::new();
    token.cancel();

    let (document, errors) = parse(vec![param_block("mem:a.c", 0, "x")], token).await;

    assert!(document.is_empty());
    assert!(errors.is_empty());
}

#[tokio::test]
async fn cancellation_discards_results_without_error() {
    // Workers already dispatched run to completion; their results are
    // dropped once cancellation is observed at the join.
    let token = CancelToken::new();
    let blocks = vec![param_block("mem:a.c", 0, "x"), param_block("mem:b.c", 0, "y")];
    token.cancel();

    let (document, errors) = parse(blocks, token).await;
    assert!(document.is_empty());
    assert!(errors.is_empty());
}

#[tokio::test]
async fn syntax_errors_are_located_in_the_failing_block() {
    let blocks = vec![
        param_block("mem:good.c", 5, "ok"),
        Block::new("mem:bad.c", 9, "<param name=\"x\" type=\"string\" summary=\"s\""),
    ];

    let (document, errors) = parse(blocks, CancelToken::new()).await;

    assert_eq!(document.len(), 1);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), ErrorKind::NotFoundEndTag);
    assert_eq!(errors[0].location().uri, "mem:bad.c");
    assert_eq!(errors[0].location().range.start.line, 9);
}
