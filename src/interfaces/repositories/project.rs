use async_trait::async_trait;

use crate::{
    entities::project::{NewProject, Project, ProjectSummary},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

const PROJECT_COLUMNS: &str = r#"
    id, created_at, name, "type", github_link, project_url, "year", dev_time,
    technologies, main_image, secondary_image, overview, detailed_description,
    in_progress, bg_color, text_color
"#;

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Every project, full records
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;

    /// Every project, list projection
    async fn list_project_summaries(&self) -> Result<Vec<ProjectSummary>, AppError>;

    async fn get_project_by_name(&self, name: &str) -> Result<Option<Project>, AppError>;

    /// Inserts a project and returns its generated id
    async fn create_project(&self, project: &NewProject) -> Result<i32, AppError>;

    /// Replaces every mutable field of the project called `project.name`.
    /// Returns the number of rows touched.
    async fn update_project(&self, project: &NewProject) -> Result<u64, AppError>;

    /// Returns the number of rows deleted
    async fn delete_project(&self, name: &str) -> Result<u64, AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id");

        let projects = sqlx::query_as::<_, Project>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn list_project_summaries(&self) -> Result<Vec<ProjectSummary>, AppError> {
        let summaries = sqlx::query_as::<_, ProjectSummary>(
            r#"
            SELECT id, name, main_image, in_progress, bg_color, text_color
            FROM projects
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    async fn get_project_by_name(&self, name: &str) -> Result<Option<Project>, AppError> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE name = $1");

        sqlx::query_as::<_, Project>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create_project(&self, project: &NewProject) -> Result<i32, AppError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO projects (
                name, "type", github_link, project_url, "year", dev_time, technologies,
                main_image, secondary_image, overview, detailed_description,
                in_progress, bg_color, text_color
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
            "#,
        )
        .bind(&project.name)
        .bind(&project.project_type)
        .bind(&project.github_link)
        .bind(&project.project_url)
        .bind(project.year)
        .bind(&project.dev_time)
        .bind(&project.technologies)
        .bind(&project.main_image)
        .bind(&project.secondary_image)
        .bind(&project.overview)
        .bind(&project.detailed_description)
        .bind(project.in_progress)
        .bind(&project.bg_color)
        .bind(&project.text_color)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_project(&self, project: &NewProject) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET
                "type" = $1,
                github_link = $2,
                project_url = $3,
                "year" = $4,
                dev_time = $5,
                technologies = $6,
                main_image = $7,
                secondary_image = $8,
                overview = $9,
                detailed_description = $10,
                in_progress = $11,
                bg_color = $12,
                text_color = $13
            WHERE name = $14
            "#,
        )
        .bind(&project.project_type)
        .bind(&project.github_link)
        .bind(&project.project_url)
        .bind(project.year)
        .bind(&project.dev_time)
        .bind(&project.technologies)
        .bind(&project.main_image)
        .bind(&project.secondary_image)
        .bind(&project.overview)
        .bind(&project.detailed_description)
        .bind(project.in_progress)
        .bind(&project.bg_color)
        .bind(&project.text_color)
        .bind(&project.name)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_project(&self, name: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
