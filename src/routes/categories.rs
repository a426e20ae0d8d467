use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::domain::category::Category;
use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::{CategoryForm, FieldErrors};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::categories::{
    CategorySubmission, edit_category as edit_category_service,
    new_category as new_category_service, show_categories as show_categories_service,
    submit_category as submit_category_service,
};

const CATEGORY_INDEX_URL: &str = "/admin/category";
const NEW_CATEGORY_URL: &str = "/admin/category/new";

fn edit_category_url(category_id: CategoryId) -> String {
    format!("/admin/category/{category_id}/edit")
}

/// Everything the register template needs to draw the form.
struct RegisterView<'a> {
    category: &'a Category,
    form: &'a CategoryForm,
    errors: &'a FieldErrors,
    form_action: &'a str,
}

fn render_register(
    view: RegisterView<'_>,
    user: &AuthenticatedUser,
    flash_messages: &IncomingFlashMessages,
    home_url: &str,
    tera: &Tera,
) -> HttpResponse {
    let mut context = base_context(flash_messages, user, "categories", home_url);
    context.insert("category", &CategoryDto::from(view.category));
    context.insert("is_new", &!view.category.is_persisted());
    context.insert("form", view.form);
    context.insert("errors", view.errors);
    context.insert("form_action", view.form_action);
    render_template(tera, "categories/register.html", &context)
}

/// Map failures shared by every category page onto responses.
fn error_response(err: ServiceError, context: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => redirect("/na"),
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        err => {
            log::error!("{context}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn parse_category_id(raw: i32) -> Result<CategoryId, HttpResponse> {
    CategoryId::new(raw).map_err(|_| HttpResponse::NotFound().finish())
}

fn finish_submission(
    submission: Result<CategorySubmission, ServiceError>,
    form_action: &str,
    user: &AuthenticatedUser,
    flash_messages: &IncomingFlashMessages,
    home_url: &str,
    tera: &Tera,
) -> HttpResponse {
    match submission {
        Ok(CategorySubmission::Saved { action, .. }) => {
            FlashMessage::success(action.success_message()).send();
            redirect(CATEGORY_INDEX_URL)
        }
        Ok(CategorySubmission::Invalid {
            category,
            form,
            errors,
        }) => render_register(
            RegisterView {
                category: &category,
                form: &form,
                errors: &errors,
                form_action,
            },
            user,
            flash_messages,
            home_url,
            tera,
        ),
        Err(err) => error_response(err, "Failed to save category"),
    }
}

#[get("/admin/category")]
pub async fn show_categories(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_categories_service(&user, repo.get_ref()) {
        Ok(categories) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "categories",
                &server_config.auth_service_url,
            );
            context.insert("categories", &categories);
            render_template(&tera, "categories/index.html", &context)
        }
        Err(err) => error_response(err, "Failed to render categories page"),
    }
}

#[get("/admin/category/new")]
pub async fn new_category(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match new_category_service(&user) {
        Ok(category) => render_register(
            RegisterView {
                category: &category,
                form: &CategoryForm::default(),
                errors: &FieldErrors::new(),
                form_action: NEW_CATEGORY_URL,
            },
            &user,
            &flash_messages,
            &server_config.auth_service_url,
            &tera,
        ),
        Err(err) => error_response(err, "Failed to render new category page"),
    }
}

#[post("/admin/category/new")]
pub async fn create_category(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CategoryForm>,
) -> impl Responder {
    let submission = new_category_service(&user)
        .and_then(|category| submit_category_service(category, form, &user, repo.get_ref()));

    finish_submission(
        submission,
        NEW_CATEGORY_URL,
        &user,
        &flash_messages,
        &server_config.auth_service_url,
        &tera,
    )
}

#[get("/admin/category/{category_id}/edit")]
pub async fn edit_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let category_id = match parse_category_id(category_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match edit_category_service(category_id, &user, repo.get_ref()) {
        Ok(category) => render_register(
            RegisterView {
                category: &category,
                form: &CategoryForm::with_name(category.name()),
                errors: &FieldErrors::new(),
                form_action: &edit_category_url(category_id),
            },
            &user,
            &flash_messages,
            &server_config.auth_service_url,
            &tera,
        ),
        Err(err) => error_response(err, "Failed to render edit category page"),
    }
}

#[post("/admin/category/{category_id}/edit")]
pub async fn update_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CategoryForm>,
) -> impl Responder {
    let category_id = match parse_category_id(category_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let submission = edit_category_service(category_id, &user, repo.get_ref())
        .and_then(|category| submit_category_service(category, form, &user, repo.get_ref()));

    finish_submission(
        submission,
        &edit_category_url(category_id),
        &user,
        &flash_messages,
        &server_config.auth_service_url,
        &tera,
    )
}
