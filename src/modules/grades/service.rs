use tracing::{debug, instrument};

use schoolhub_core::AppError;
use schoolhub_db::SchoolStore;
use schoolhub_models::grades::{CreateGradeDto, Grade};

pub struct GradeService;

impl GradeService {
    /// Stores a grade, deriving the letter from the score when none was sent.
    #[instrument(skip(store))]
    pub async fn create_grade(
        store: &dyn SchoolStore,
        dto: CreateGradeDto,
    ) -> Result<Vec<Grade>, AppError> {
        let derive = dto.grade.is_none() && dto.score.is_some();
        let dto = dto.with_derived_letter();
        if derive {
            debug!(score = ?dto.score, grade = ?dto.grade, "Derived letter grade from score");
        }

        store.create_grade(dto).await
    }
}
