use ir_core::{Corpus, CoreError, CorpusStore, Tokenizer};
use std::thread;

fn docs(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

fn pets() -> Vec<String> {
    docs(&["the cat sat", "the dog ran", "cats and dogs"])
}

fn assert_shape(corpus: &Corpus) {
    assert_eq!(corpus.matrix().len(), corpus.documents().len());
    assert_eq!(corpus.idf().len(), corpus.vocabulary().len());
    for row in corpus.matrix() {
        assert_eq!(row.len(), corpus.vocabulary().len());
    }
}

#[test]
fn vocabulary_follows_first_seen_order() {
    let corpus = Corpus::build(pets(), Tokenizer::Whitespace).unwrap();
    assert_eq!(corpus.vocabulary().terms(), &["the", "cat", "sat", "dog", "ran", "cats", "and", "dogs"]);
    assert_shape(&corpus);
}

#[test]
fn query_matches_only_sharing_documents() {
    let corpus = Corpus::build(pets(), Tokenizer::Whitespace).unwrap();
    let q = corpus.weigh_query("cat");
    let nonzero: Vec<usize> = q.iter().enumerate().filter(|(_, w)| **w != 0.0).map(|(i, _)| i).collect();
    assert_eq!(nonzero, vec![1]);

    let outcome = corpus.search("cat", 5);
    assert_eq!(outcome.similarities.len(), 3);
    assert_eq!(outcome.hits[0].doc_id, 0);
    assert!(outcome.hits[0].score > 0.0);
    let score_of = |id: usize| outcome.similarities.iter().find(|r| r.doc_id == id).unwrap().score;
    assert_eq!(score_of(1), 0.0);
    assert_eq!(score_of(2), 0.0);
    // zero-score ties keep corpus order
    assert_eq!(outcome.similarities[1].doc_id, 1);
    assert_eq!(outcome.similarities[2].doc_id, 2);

    assert_eq!(outcome.query_weights.len(), 1);
    assert_eq!(outcome.query_weights[0].term, "cat");
}

#[test]
fn top_k_truncates_hits_but_not_similarities() {
    let corpus = Corpus::build(pets(), Tokenizer::Whitespace).unwrap();
    let outcome = corpus.search("dog", 1);
    assert_eq!(outcome.hits.len(), 1);
    assert_eq!(outcome.hits[0].doc_id, 1);
    assert_eq!(outcome.similarities.len(), 3);
}

#[test]
fn unknown_and_empty_queries_score_zero() {
    let corpus = Corpus::build(pets(), Tokenizer::Whitespace).unwrap();
    for query in ["", "unicorn rainbow"] {
        let outcome = corpus.search(query, 5);
        assert!(outcome.query_weights.is_empty());
        assert!(outcome.similarities.iter().all(|r| r.score == 0.0));
        let order: Vec<usize> = outcome.similarities.iter().map(|r| r.doc_id).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }
}

#[test]
fn empty_documents_do_not_poison_weights() {
    let corpus = Corpus::build(docs(&["alpha beta", "", "beta gamma"]), Tokenizer::Whitespace).unwrap();
    assert_shape(&corpus);
    assert!(corpus.matrix().iter().flatten().all(|w| w.is_finite()));
    assert!(corpus.matrix()[1].iter().all(|w| *w == 0.0));
    let outcome = corpus.search("alpha", 3);
    assert!(outcome.similarities.iter().all(|r| r.score.is_finite()));
    assert!(corpus.project(2).iter().flat_map(|p| p.coords.iter()).all(|c| c.is_finite()));
}

#[test]
fn builds_are_deterministic() {
    let a = Corpus::build(pets(), Tokenizer::Whitespace).unwrap();
    let b = Corpus::build(pets(), Tokenizer::Whitespace).unwrap();
    assert_eq!(a, b);
}

#[test]
fn replace_with_nothing_is_rejected() {
    let store = CorpusStore::new(pets(), Tokenizer::Whitespace).unwrap();
    let err = store.replace(Vec::new()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidDataset(_)));
    assert_eq!(store.snapshot().dataset_info(5).num_documents, 3);
}

#[test]
fn reset_restores_the_default_corpus() {
    let store = CorpusStore::new(pets(), Tokenizer::Whitespace).unwrap();
    let original = store.snapshot();
    store.replace(docs(&["one fish", "two fish"])).unwrap();
    store.replace(docs(&["red fish blue fish"])).unwrap();
    assert_eq!(store.snapshot().len(), 1);
    assert_shape(&store.snapshot());

    store.reset().unwrap();
    assert_eq!(*store.snapshot(), *original);
    store.reset().unwrap();
    assert_eq!(*store.snapshot(), *original);
}

#[test]
fn identical_documents_project_together() {
    let corpus = Corpus::build(docs(&["same words here", "same words here"]), Tokenizer::Whitespace).unwrap();
    for dims in [2, 3] {
        let projections = corpus.project(dims);
        assert_eq!(projections.len(), 2);
        for (a, b) in projections[0].coords.iter().zip(&projections[1].coords) {
            assert!((a - b).abs() < 1e-9);
        }
        assert_eq!(projections[0].coords.len(), dims);
    }
}

#[test]
fn projection_handles_fewer_documents_than_terms() {
    let corpus = Corpus::build(pets(), Tokenizer::Whitespace).unwrap();
    let projections = corpus.try_project(3).unwrap();
    assert_eq!(projections.len(), 3);
    assert!(projections.iter().all(|p| p.coords.len() == 3 && p.coords.iter().all(|c| c.is_finite())));
}

#[test]
fn dataset_info_and_matrix_sample_are_bounded() {
    let corpus = Corpus::build(pets(), Tokenizer::Whitespace).unwrap();
    let info = corpus.dataset_info(5);
    assert_eq!(info.num_documents, 3);
    assert_eq!(info.num_features, 8);
    assert_eq!(info.sample_documents.len(), 3);

    let sample = corpus.matrix_sample(5, 10);
    assert_eq!(sample.feature_names.len(), 8);
    assert_eq!(sample.tfidf_sample.len(), 3);
    assert!(sample.tfidf_sample.iter().all(|row| row.len() == 8));
}

#[test]
fn labels_round_trip_within_a_snapshot() {
    let corpus = Corpus::build(pets(), Tokenizer::Whitespace).unwrap();
    assert_eq!(Corpus::label(0), "doc1");
    assert_eq!(Corpus::title(2), "Document 3");
    assert_eq!(corpus.find("doc2").unwrap().content, "the dog ran");
    assert!(corpus.find("doc0").is_none());
    assert!(corpus.find("doc4").is_none());
    assert!(corpus.find("cat").is_none());
}

#[test]
fn words_policy_applies_to_queries_too() {
    let corpus = Corpus::build(docs(&["The Cat, sat.", "A dog ran!", "Birds fly"]), Tokenizer::Words).unwrap();
    assert_eq!(corpus.vocabulary().terms(), &["cat", "sat", "dog", "ran", "birds", "fly"]);
    let outcome = corpus.search("CAT!", 2);
    assert_eq!(outcome.hits[0].doc_id, 0);
    assert!(outcome.hits[0].score > 0.0);
}

#[test]
fn concurrent_readers_only_see_whole_snapshots() {
    let fish = docs(&["one fish two fish", "red fish", "blue fish", "old fish new fish"]);
    let default_corpus = Corpus::build(pets(), Tokenizer::Whitespace).unwrap();
    let fish_corpus = Corpus::build(fish.clone(), Tokenizer::Whitespace).unwrap();
    let store = CorpusStore::new(pets(), Tokenizer::Whitespace).unwrap();

    thread::scope(|s| {
        let replacer = s.spawn(|| {
            for _ in 0..200 {
                store.replace(fish.clone()).unwrap();
            }
        });
        let resetter = s.spawn(|| {
            for _ in 0..200 {
                store.reset().unwrap();
            }
        });

        let mut reads = 0;
        while reads < 2_000 || !(replacer.is_finished() && resetter.is_finished()) {
            let snapshot = store.snapshot();
            assert_shape(&snapshot);
            assert!(*snapshot == default_corpus || *snapshot == fish_corpus);
            reads += 1;
        }
    });

    let last = store.snapshot();
    assert!(*last == default_corpus || *last == fish_corpus);
}
