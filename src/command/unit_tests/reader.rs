use tokio::{io::AsyncWriteExt, sync::mpsc};

use crate::command::{
    event::StreamChunk,
    reader::{DEFAULT_CHUNK_SIZE, StreamReader},
};

async fn collect(rx: &mut mpsc::UnboundedReceiver<StreamChunk>) -> Vec<StreamChunk> {
    let mut chunks = Vec::new();
    while let Some(chunk) = rx.recv().await {
        chunks.push(chunk);
    }
    chunks
}

#[tokio::test]
async fn empty_stream_delivers_only_end() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    StreamReader::new(&b""[..])
        .spawn(move |chunk| {
            let _ = tx.send(chunk);
        })
        .await
        .unwrap();
    assert_eq!(collect(&mut rx).await, vec![StreamChunk::End]);
}

#[tokio::test]
async fn reconstructs_data_larger_than_chunk_size() {
    let payload: Vec<u8> = (0..10_000u32).map(|n| (n % 251) as u8).collect();
    let (mut writer, reader) = tokio::io::duplex(128);
    let expected = payload.clone();
    let writer_task = tokio::spawn(async move {
        for part in payload.chunks(700) {
            writer.write_all(part).await.unwrap();
        }
    });

    let (tx, mut rx) = mpsc::unbounded_channel();
    let reader_task = StreamReader::new(reader).chunk_size(100).spawn(move |chunk| {
        let _ = tx.send(chunk);
    });
    writer_task.await.unwrap();
    reader_task.await.unwrap();

    let chunks = collect(&mut rx).await;
    assert_eq!(chunks.last(), Some(&StreamChunk::End));
    let ends = chunks.iter().filter(|c| **c == StreamChunk::End).count();
    assert_eq!(ends, 1);

    let mut received = Vec::new();
    for chunk in &chunks[..chunks.len() - 1] {
        let StreamChunk::Data(data) = chunk else {
            panic!("unexpected end before last chunk");
        };
        assert!(!data.is_empty());
        assert!(data.len() <= 100);
        received.extend_from_slice(data);
    }
    assert_eq!(received, expected);
}

#[tokio::test]
async fn zero_chunk_size_is_raised() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    StreamReader::new(&b"ab"[..])
        .chunk_size(0)
        .run(move |chunk| {
            let _ = tx.send(chunk);
        })
        .await;
    assert_eq!(
        collect(&mut rx).await,
        vec![
            StreamChunk::Data(b"a".to_vec()),
            StreamChunk::Data(b"b".to_vec()),
            StreamChunk::End,
        ]
    );
}

#[test]
fn default_chunk_size() {
    assert_eq!(DEFAULT_CHUNK_SIZE, 1024);
}
