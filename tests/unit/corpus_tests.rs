/*!
 * Tests for corpus loading, ordering and doctext output
 */

use anyhow::Result;
use discourse_inject::corpus::doctext::{parse_doctext, write_doctext};
use discourse_inject::corpus::{load_corpus, tokenize, Corpus, CorpusLayout, DocId, ParallelCorpus};
use discourse_inject::errors::{CorpusError, InjectionError};
use crate::common;

/// Test loading a doctext file with the auto layout
#[test]
fn test_load_corpus_withDoctextFile_shouldReadAllDocuments() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "pe.txt", common::SAMPLE_PE)?;

    let corpus = load_corpus(&path, CorpusLayout::Auto)?;

    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus.line_count(), 6);
    assert_eq!(corpus.line(&DocId::from("2"), 2), Some("an extra remark followed"));
    Ok(())
}

/// Test loading a directory of per-document files
#[test]
fn test_load_corpus_withDirectory_shouldUseDigitsAsIds() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = common::write_corpus_dir(
        &temp_dir.path().join("pe"),
        &[
            ("doc10.txt", &["tenth document"]),
            ("doc2.txt", &["second document", "second line"]),
            ("notes.txt", &["no digits here"]),
        ],
    )?;

    let corpus = load_corpus(&dir, CorpusLayout::Auto)?;

    let ids: Vec<&str> = corpus.ids().map(DocId::as_str).collect();
    assert_eq!(ids, vec!["2", "10", "notes"]);
    assert_eq!(corpus.document(&DocId::from("2")).map(<[String]>::len), Some(2));
    Ok(())
}

/// Test that two files with the same digits collapse to the later file
#[test]
fn test_load_corpus_withDuplicateIdsInDirectory_shouldKeepLastFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = common::write_corpus_dir(
        &temp_dir.path().join("pe"),
        &[("a1.txt", &["from a"]), ("b1.txt", &["from b"])],
    )?;

    let corpus = load_corpus(&dir, CorpusLayout::Directory)?;

    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus.line(&DocId::from("1"), 0), Some("from b"));
    Ok(())
}

/// Test that a '#' sentence without an id stays inside its document
#[test]
fn test_load_corpus_withHashSentenceInDoctext_shouldKeepItAsLine() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "pe.txt",
        "# id=1
#1 priority is safety
Next line
",
    )?;

    let corpus = load_corpus(&path, CorpusLayout::Doctext)?;

    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus.line(&DocId::from("1"), 0), Some("#1 priority is safety"));
    assert_eq!(corpus.line(&DocId::from("1"), 1), Some("Next line"));
    Ok(())
}

/// Test that an explicit directory layout rejects a plain file
#[test]
fn test_load_corpus_withDirectoryLayoutOnFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "pe.txt", common::SAMPLE_PE)?;

    let result = load_corpus(&path, CorpusLayout::Directory);
    assert!(matches!(result, Err(CorpusError::NotFound(_))));
    Ok(())
}

/// Test that a missing path is reported as not found
#[test]
fn test_load_corpus_withMissingPath_shouldReturnNotFound() {
    let result = load_corpus("does/not/exist", CorpusLayout::Auto);
    assert!(matches!(result, Err(CorpusError::NotFound(_))));
}

/// Test that an empty doctext file is rejected
#[test]
fn test_load_corpus_withEmptyFile_shouldReturnEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "empty.txt", "")?;

    let result = load_corpus(&path, CorpusLayout::Doctext);
    assert!(matches!(result, Err(CorpusError::Empty(_))));
    Ok(())
}

/// Test that an empty directory is rejected
#[test]
fn test_load_corpus_withEmptyDirectory_shouldReturnEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let result = load_corpus(temp_dir.path(), CorpusLayout::Directory);
    assert!(matches!(result, Err(CorpusError::Empty(_))));
    Ok(())
}

/// Test document id ordering: numbers by value, then names
#[test]
fn test_docId_ordering_withMixedIds_shouldPutNumbersFirst() {
    let corpus: Corpus = vec![
        (DocId::from("b"), vec!["x"]),
        (DocId::from("11"), vec!["x"]),
        (DocId::from("a"), vec!["x"]),
        (DocId::from("3"), vec!["x"]),
    ]
    .into_iter()
    .collect();

    let ids: Vec<String> = corpus.ids().map(|id| id.to_string()).collect();
    assert_eq!(ids, vec!["3", "11", "a", "b"]);
}

/// Test that writing doctext reproduces a parsed stream
#[test]
fn test_write_doctext_withParsedCorpus_shouldReproduceInput() -> Result<()> {
    let corpus = parse_doctext(common::SAMPLE_MT);

    let mut buffer = Vec::new();
    write_doctext(
        &mut buffer,
        corpus.iter().map(|(id, lines)| (id, lines.to_vec())),
    )?;

    assert_eq!(String::from_utf8(buffer)?, common::SAMPLE_MT);
    Ok(())
}

/// Test sentence pair lookup across the PE and MT corpora
#[test]
fn test_sentence_pair_withKnownAndUnknownLines_shouldResolveOrFail() -> Result<()> {
    let corpus = ParallelCorpus::new(parse_doctext(common::SAMPLE_PE), parse_doctext(common::SAMPLE_MT));

    let (pe, mt) = corpus.sentence_pair(&DocId::from("1"), 1)?;
    assert_eq!(pe, "A crucial step");
    assert_eq!(mt, "Yet a crucial step");

    assert_eq!(
        corpus.sentence_pair(&DocId::from("1"), 7).unwrap_err(),
        InjectionError::UnknownLine {
            doc: "1".to_string(),
            line: 7
        }
    );
    assert!(matches!(
        corpus.sentence_pair(&DocId::from("99"), 0),
        Err(InjectionError::UnknownDocument(_))
    ));
    Ok(())
}

/// Test tokenization of a sample sentence
#[test]
fn test_tokenize_withSampleSentence_shouldSplitWords() {
    assert_eq!(
        tokenize("the very old building stood."),
        vec!["the", "very", "old", "building", "stood", "."]
    );
}
