use crate::capabilities::{AnswerGenerator, IntentClassifier};
use crate::error::Result;
use crate::prompts::{
    answer_prompt, build_context, ANSWER_SYSTEM_PROMPT, NO_RESULTS_MESSAGE,
};
use assistant_retrieval::{HybridRetriever, Intent, RetrievalQuery};
use std::sync::Arc;

/// The ask pipeline: classify, retrieve, generate.
///
/// Collaborators arrive by injection; the service holds no global state and
/// one `ask` call runs to completion before returning.
pub struct AssistantService {
    classifier: Arc<dyn IntentClassifier>,
    generator: Arc<dyn AnswerGenerator>,
    retriever: HybridRetriever,
}

impl AssistantService {
    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        generator: Arc<dyn AnswerGenerator>,
        retriever: HybridRetriever,
    ) -> Self {
        Self {
            classifier,
            generator,
            retriever,
        }
    }

    #[must_use]
    pub fn retriever(&self) -> &HybridRetriever {
        &self.retriever
    }

    /// Answer a question about one repository.
    ///
    /// Classification is fail-open: an error or an out-of-vocabulary label
    /// downgrades to [`Intent::General`]. An empty retrieval result
    /// short-circuits with the fixed no-results message; only a retrieval
    /// or generation failure is surfaced as an error.
    pub async fn ask(&self, question: &str, repo_name: &str) -> Result<String> {
        let intent = match self.classifier.classify(question).await {
            Ok(label) => Intent::from_label_or_general(&label),
            Err(err) => {
                log::warn!("Intent classification failed ({err}), falling back to general");
                Intent::General
            }
        };
        log::debug!("Question classified as {intent}");

        let query = RetrievalQuery::new(question, repo_name, intent);
        let fragments = self.retriever.retrieve(&query).await?;
        log::debug!("Fragments retrieved: {}", fragments.len());

        if fragments.is_empty() {
            return Ok(NO_RESULTS_MESSAGE.to_string());
        }

        let context = build_context(&fragments);
        let prompt = answer_prompt(question, &context);

        let answer = self.generator.generate(ANSWER_SYSTEM_PROMPT, &prompt).await?;
        Ok(answer.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use assistant_chunks::{Chunk, ChunkType};
    use assistant_graph::DependencyGraph;
    use assistant_vector_store::{
        Embedder, InMemoryIndex, StoredChunk, TokenHashEmbedder, VectorIndex,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    struct FixedClassifier(std::result::Result<&'static str, ()>);

    #[async_trait]
    impl IntentClassifier for FixedClassifier {
        async fn classify(&self, _question: &str) -> Result<String> {
            self.0
                .map(str::to_string)
                .map_err(|()| LlmError::ClassificationError("model unreachable".into()))
        }
    }

    #[derive(Default)]
    struct RecordingGenerator {
        called: AtomicBool,
        last_prompt: Mutex<Option<String>>,
    }

    #[async_trait]
    impl AnswerGenerator for RecordingGenerator {
        async fn generate(&self, _system: &str, prompt: &str) -> Result<String> {
            self.called.store(true, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            Ok("  generated answer \n".to_string())
        }
    }

    async fn retriever_with(chunks: Vec<Chunk>) -> HybridRetriever {
        let embedder = TokenHashEmbedder::default();
        let index = InMemoryIndex::new();

        let mut records = Vec::new();
        for chunk in chunks {
            let embedding = embedder.embed(&chunk.code).await.unwrap();
            records.push(StoredChunk { chunk, embedding });
        }
        index.upsert(records).await.unwrap();

        HybridRetriever::new(
            Arc::new(index),
            Arc::new(TokenHashEmbedder::default()),
            DependencyGraph::new(),
        )
    }

    fn sample_chunk() -> Chunk {
        Chunk::new("r1", "src/worker.py", "Worker.run", "def run(): the worker body")
            .unwrap()
            .chunk_type(ChunkType::Function)
    }

    #[tokio::test]
    async fn answers_from_retrieved_context() {
        let generator = Arc::new(RecordingGenerator::default());
        let service = AssistantService::new(
            Arc::new(FixedClassifier(Ok("specific"))),
            generator.clone(),
            retriever_with(vec![sample_chunk()]).await,
        );

        let answer = service.ask("what does the worker do", "r1").await.unwrap();
        assert_eq!(answer, "generated answer");

        let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("def run(): the worker body"));
        assert!(prompt.contains("what does the worker do"));
    }

    #[tokio::test]
    async fn empty_retrieval_short_circuits_the_generator() {
        let generator = Arc::new(RecordingGenerator::default());
        let service = AssistantService::new(
            Arc::new(FixedClassifier(Ok("general"))),
            generator.clone(),
            retriever_with(Vec::new()).await,
        );

        let answer = service.ask("anything", "r1").await.unwrap();
        assert_eq!(answer, NO_RESULTS_MESSAGE);
        assert!(!generator.called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn classifier_failure_falls_back_to_general() {
        let generator = Arc::new(RecordingGenerator::default());
        let service = AssistantService::new(
            Arc::new(FixedClassifier(Err(()))),
            generator.clone(),
            retriever_with(vec![sample_chunk()]).await,
        );

        let answer = service.ask("what does the worker do", "r1").await.unwrap();
        assert_eq!(answer, "generated answer");
    }

    #[tokio::test]
    async fn out_of_vocabulary_label_falls_back_to_general() {
        let generator = Arc::new(RecordingGenerator::default());
        let service = AssistantService::new(
            Arc::new(FixedClassifier(Ok("poetry"))),
            generator.clone(),
            retriever_with(vec![sample_chunk()]).await,
        );

        // Still answers; the bad label only cost the intent hint
        let answer = service.ask("what does the worker do", "r1").await.unwrap();
        assert_eq!(answer, "generated answer");
    }
}
