use actix_web::{http::header, middleware::from_fn, web, HttpRequest, HttpResponse, Result};
use askama::Template;
use serde::Deserialize;

use crate::{
    api::{ApiClient, ApiError},
    cache::CacheKey,
    models::{
        HeroInput, MenuItemInput, PageInput, PartnerInput, ProjectInput, ServiceInput,
        SiteSettingsInput, SlideInput, StepInput, TeamMemberInput, TestimonialInput, ThemeInput,
        UserCreateInput, UserUpdateInput, ROLES,
    },
    session::{self, admin_guard, AuthUser, TOKEN_COOKIE},
    state::AppState,
    status::{Phase, MUTATION_CLEAR},
    templates::render,
};

#[derive(Clone, Debug)]
struct AdminCtx {
    admin_name: String,
    active_tab: &'static str,
    banner_text: String,
    banner_class: String,
    has_banner: bool,
}

async fn ctx(state: &AppState, auth: &AuthUser, active_tab: &'static str) -> AdminCtx {
    let banner = state.banner.current(active_tab).await;
    AdminCtx {
        admin_name: auth.display_name.clone(),
        active_tab,
        banner_text: banner
            .as_ref()
            .map(|message| message.text.clone())
            .unwrap_or_default(),
        banner_class: match banner.as_ref().map(|message| message.phase) {
            Some(Phase::Success) => "banner-success",
            Some(Phase::Failure) => "banner-failure",
            Some(Phase::Submitting) => "banner-submitting",
            None => "",
        }
        .to_string(),
        has_banner: banner.is_some(),
    }
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .append_header((header::LOCATION, location.to_string()))
        .finish()
}

fn opt(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Shared tail of every mutation: invalidate on success, banner either way.
/// The banner lands on the tab the mutation came from.
async fn finish_mutation<T>(
    state: &AppState,
    tab: &'static str,
    result: Result<T, ApiError>,
    keys: &[CacheKey],
    success_text: &str,
) -> bool {
    match result {
        Ok(_) => {
            for key in keys {
                state.cache.invalidate(*key).await;
            }
            state.banner.success(tab, success_text, MUTATION_CLEAR).await;
            true
        }
        Err(err) => {
            log::warn!("admin mutation failed: {err}");
            state.banner.failure(tab, err.message(), MUTATION_CLEAR).await;
            false
        }
    }
}

#[derive(Deserialize)]
struct EditQuery {
    edit: Option<i64>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(from_fn(admin_guard))
            .service(web::resource("").route(web::get().to(index)))
            .service(web::resource("/").route(web::get().to(index)))
            .service(web::resource("/logout").route(web::post().to(logout)))
            .service(web::resource("/dashboard").route(web::get().to(dashboard)))
            .service(web::resource("/hero").route(web::get().to(hero_tab)).route(web::post().to(update_hero)))
            .service(web::resource("/slides").route(web::get().to(slides_tab)).route(web::post().to(create_slide)))
            .service(web::resource("/slides/{id}/toggle").route(web::post().to(toggle_slide)))
            .service(web::resource("/slides/{id}/delete").route(web::post().to(delete_slide)))
            .service(web::resource("/process").route(web::get().to(process_tab)).route(web::post().to(create_process_step)))
            .service(web::resource("/process/{id}").route(web::post().to(update_process_step)))
            .service(web::resource("/process/{id}/delete").route(web::post().to(delete_process_step)))
            .service(web::resource("/why-choose-us").route(web::get().to(why_tab)).route(web::post().to(create_why_item)))
            .service(web::resource("/why-choose-us/{id}").route(web::post().to(update_why_item)))
            .service(web::resource("/why-choose-us/{id}/delete").route(web::post().to(delete_why_item)))
            .service(web::resource("/settings").route(web::get().to(settings_tab)).route(web::post().to(update_settings)))
            .service(web::resource("/services").route(web::get().to(services_tab)).route(web::post().to(create_service)))
            .service(web::resource("/services/{id}").route(web::post().to(update_service)))
            .service(web::resource("/services/{id}/delete").route(web::post().to(delete_service)))
            .service(web::resource("/projects").route(web::get().to(projects_tab)).route(web::post().to(create_project)))
            .service(web::resource("/projects/{id}").route(web::post().to(update_project)))
            .service(web::resource("/projects/{id}/delete").route(web::post().to(delete_project)))
            .service(web::resource("/testimonials").route(web::get().to(testimonials_tab)).route(web::post().to(create_testimonial)))
            .service(web::resource("/testimonials/{id}").route(web::post().to(update_testimonial)))
            .service(web::resource("/testimonials/{id}/delete").route(web::post().to(delete_testimonial)))
            .service(web::resource("/partners").route(web::get().to(partners_tab)).route(web::post().to(create_partner)))
            .service(web::resource("/partners/{id}").route(web::post().to(update_partner)))
            .service(web::resource("/partners/{id}/delete").route(web::post().to(delete_partner)))
            .service(web::resource("/pages").route(web::get().to(pages_tab)).route(web::post().to(create_page)))
            .service(web::resource("/pages/seed").route(web::post().to(seed_pages)))
            .service(web::resource("/pages/{id}").route(web::post().to(update_page)))
            .service(web::resource("/pages/{id}/delete").route(web::post().to(delete_page)))
            .service(web::resource("/navbar").route(web::get().to(navbar_tab)).route(web::post().to(create_menu_item)))
            .service(web::resource("/navbar/seed").route(web::post().to(seed_navbar)))
            .service(web::resource("/navbar/{id}/delete").route(web::post().to(delete_menu_item)))
            .service(web::resource("/users").route(web::get().to(users_tab)).route(web::post().to(create_user)))
            .service(web::resource("/users/{id}").route(web::post().to(update_user)))
            .service(web::resource("/users/{id}/delete").route(web::post().to(delete_user)))
            .service(web::resource("/team").route(web::get().to(team_tab)).route(web::post().to(create_team_member)))
            .service(web::resource("/team/{id}").route(web::post().to(update_team_member)))
            .service(web::resource("/team/{id}/delete").route(web::post().to(delete_team_member)))
            .service(web::resource("/theme").route(web::get().to(theme_tab)).route(web::post().to(update_theme))),
    );
}

async fn index() -> HttpResponse {
    see_other("/admin/dashboard")
}

/// Signed-in admins only; the guard has already resolved the cookie.
async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Some(cookie) = req.cookie(TOKEN_COOKIE) {
        state.session.logout(cookie.value()).await;
    }
    HttpResponse::SeeOther()
        .append_header((header::LOCATION, "/"))
        .cookie(session::clear_token_cookie(&req))
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

// ---------------------------------------------------------------- dashboard

#[derive(Clone, Debug)]
struct StatCard {
    label: String,
    value: usize,
}

#[derive(Template)]
#[template(path = "admin_dashboard.html")]
struct DashboardTemplate {
    ctx: AdminCtx,
    stats: Vec<StatCard>,
}

async fn dashboard(state: web::Data<AppState>, auth: web::ReqData<AuthUser>) -> Result<HttpResponse> {
    let (services, projects, testimonials, team, pages, partners) = tokio::join!(
        state.cached_list(CacheKey::Services, state.api.fetch_services()),
        state.cached_list(CacheKey::Projects, state.api.fetch_projects()),
        state.cached_list(CacheKey::Testimonials, state.api.fetch_testimonials()),
        state.cached_list(CacheKey::Team, state.api.fetch_team()),
        state.cached_list(CacheKey::Pages, state.api.fetch_pages()),
        state.cached_list(CacheKey::Partners, state.api.fetch_partners()),
    );

    let stats = vec![
        StatCard { label: "Services".to_string(), value: services.len() },
        StatCard { label: "Projects".to_string(), value: projects.len() },
        StatCard { label: "Testimonials".to_string(), value: testimonials.len() },
        StatCard { label: "Team members".to_string(), value: team.len() },
        StatCard { label: "Custom pages".to_string(), value: pages.len() },
        StatCard { label: "Partners".to_string(), value: partners.len() },
    ];

    Ok(render(DashboardTemplate {
        ctx: ctx(&state, &auth, "dashboard").await,
        stats,
    }))
}

// --------------------------------------------------------------------- hero

#[derive(Clone, Default, Deserialize)]
struct HeroForm {
    title: String,
    subtitle: String,
    primary_cta: String,
    secondary_cta: String,
    stat1_value: i64,
    stat1_label: String,
    stat2_value: i64,
    stat2_label: String,
    stat3_value: i64,
    stat3_label: String,
}

#[derive(Template)]
#[template(path = "admin_hero.html")]
struct HeroTemplate {
    ctx: AdminCtx,
    draft: HeroForm,
}

async fn render_hero_tab(
    state: &AppState,
    auth: &AuthUser,
    draft: Option<HeroForm>,
) -> HttpResponse {
    let draft = match draft {
        Some(draft) => draft,
        None => state
            .cached(CacheKey::Hero, state.api.fetch_hero())
            .await
            .map(|hero| HeroForm {
                title: hero.title.clone(),
                subtitle: hero.subtitle.clone(),
                primary_cta: hero.primary_cta.clone(),
                secondary_cta: hero.secondary_cta.clone(),
                stat1_value: hero.stat1_value,
                stat1_label: hero.stat1_label.clone(),
                stat2_value: hero.stat2_value,
                stat2_label: hero.stat2_label.clone(),
                stat3_value: hero.stat3_value,
                stat3_label: hero.stat3_label.clone(),
            })
            .unwrap_or_default(),
    };
    render(HeroTemplate {
        ctx: ctx(state, auth, "hero").await,
        draft,
    })
}

async fn hero_tab(state: web::Data<AppState>, auth: web::ReqData<AuthUser>) -> Result<HttpResponse> {
    Ok(render_hero_tab(&state, &auth, None).await)
}

async fn update_hero(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    form: web::Form<HeroForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    state.banner.submitting("hero", "Saving hero section...").await;
    let input = HeroInput {
        title: form.title.trim().to_string(),
        subtitle: form.subtitle.trim().to_string(),
        primary_cta: form.primary_cta.trim().to_string(),
        secondary_cta: form.secondary_cta.trim().to_string(),
        stat1_value: form.stat1_value,
        stat1_label: form.stat1_label.trim().to_string(),
        stat2_value: form.stat2_value,
        stat2_label: form.stat2_label.trim().to_string(),
        stat3_value: form.stat3_value,
        stat3_label: form.stat3_label.trim().to_string(),
    };
    let result = api.update_hero(&input).await;
    if finish_mutation(&state, "hero", result, &[CacheKey::Hero], "Hero section updated ✓").await {
        Ok(see_other("/admin/hero"))
    } else {
        Ok(render_hero_tab(&state, &auth, Some(form)).await)
    }
}

// ------------------------------------------------------------------- slides

#[derive(Clone, Default, Deserialize)]
struct SlideForm {
    image_url: String,
    caption: String,
}

#[derive(Clone, Debug)]
struct SlideRow {
    id: i64,
    image_url: String,
    caption: String,
    is_active: bool,
}

#[derive(Template)]
#[template(path = "admin_slides.html")]
struct SlidesTemplate {
    ctx: AdminCtx,
    slides: Vec<SlideRow>,
    draft: SlideForm,
}

async fn render_slides_tab(
    state: &AppState,
    auth: &AuthUser,
    draft: SlideForm,
) -> HttpResponse {
    let mut slides = state
        .cached_list(CacheKey::HeroSlides, state.api.fetch_hero_slides())
        .await;
    slides.sort_by_key(|slide| slide.order);
    let slides = slides
        .into_iter()
        .map(|slide| SlideRow {
            id: slide.id,
            image_url: slide.image_url,
            caption: slide.caption.unwrap_or_default(),
            is_active: slide.is_active,
        })
        .collect();
    render(SlidesTemplate {
        ctx: ctx(state, auth, "slides").await,
        slides,
        draft,
    })
}

async fn slides_tab(state: web::Data<AppState>, auth: web::ReqData<AuthUser>) -> Result<HttpResponse> {
    Ok(render_slides_tab(&state, &auth, SlideForm::default()).await)
}

async fn create_slide(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    form: web::Form<SlideForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    state.banner.submitting("slides", "Adding slide...").await;
    let existing = state
        .cached_list(CacheKey::HeroSlides, state.api.fetch_hero_slides())
        .await;
    let input = SlideInput {
        image_url: form.image_url.trim().to_string(),
        caption: opt(form.caption.clone()),
        // Order is assigned from the currently loaded list; the backend
        // does not reassign it.
        order: existing.len() as i64 + 1,
        is_active: true,
    };
    let result = api.create_hero_slide(&input).await;
    if finish_mutation(&state, "slides", result, &[CacheKey::HeroSlides], "Slide added ✓").await {
        Ok(see_other("/admin/slides"))
    } else {
        Ok(render_slides_tab(&state, &auth, form).await)
    }
}

async fn toggle_slide(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    state.banner.submitting("slides", "Updating slide...").await;
    let slides = state
        .cached_list(CacheKey::HeroSlides, state.api.fetch_hero_slides())
        .await;
    match slides.into_iter().find(|slide| slide.id == id) {
        Some(slide) => {
            let input = SlideInput {
                image_url: slide.image_url,
                caption: slide.caption,
                order: slide.order,
                is_active: !slide.is_active,
            };
            let result = api.update_hero_slide(id, &input).await;
            finish_mutation(&state, "slides", result, &[CacheKey::HeroSlides], "Slide updated ✓")
                .await;
        }
        None => {
            state
                .banner
                .failure("slides", "Failed to update hero slide", MUTATION_CLEAR)
                .await;
        }
    }
    Ok(see_other("/admin/slides"))
}

async fn delete_slide(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    state.banner.submitting("slides", "Deleting...").await;
    let result = api.delete_hero_slide(path.into_inner()).await;
    finish_mutation(&state, "slides", result, &[CacheKey::HeroSlides], "Slide deleted ✓").await;
    Ok(see_other("/admin/slides"))
}

// ----------------------------------------------- process / why choose us

#[derive(Clone, Default, Deserialize)]
struct StepForm {
    title: String,
    description: String,
    order: Option<i64>,
}

#[derive(Clone, Debug)]
struct StepRow {
    id: i64,
    order: i64,
    title: String,
    description: String,
    editing: bool,
}

#[derive(Template)]
#[template(path = "admin_steps.html")]
struct StepsTemplate {
    ctx: AdminCtx,
    heading: String,
    base_path: String,
    steps: Vec<StepRow>,
    draft: StepForm,
}

struct StepTabSpec {
    tab: &'static str,
    heading: &'static str,
    base_path: &'static str,
    key: CacheKey,
}

const PROCESS_SPEC: StepTabSpec = StepTabSpec {
    tab: "process",
    heading: "Process steps",
    base_path: "/admin/process",
    key: CacheKey::ProcessSteps,
};

const WHY_SPEC: StepTabSpec = StepTabSpec {
    tab: "why-choose-us",
    heading: "Why choose us",
    base_path: "/admin/why-choose-us",
    key: CacheKey::WhyChooseUs,
};

async fn render_steps_tab(
    state: &AppState,
    auth: &AuthUser,
    spec: &StepTabSpec,
    draft: StepForm,
    editing: Option<(i64, Option<StepForm>)>,
) -> HttpResponse {
    let mut steps = match spec.key {
        CacheKey::ProcessSteps => {
            state
                .cached_list(spec.key, state.api.fetch_process_steps())
                .await
        }
        _ => {
            state
                .cached_list(spec.key, state.api.fetch_why_choose_us())
                .await
        }
    };
    steps.sort_by_key(|step| step.order);

    let (editing_id, edit_draft) = match editing {
        Some((id, draft)) => (Some(id), draft),
        None => (None, None),
    };
    let steps = steps
        .into_iter()
        .map(|step| {
            let editing = editing_id == Some(step.id);
            match (&edit_draft, editing) {
                (Some(draft), true) => StepRow {
                    id: step.id,
                    order: draft.order.unwrap_or(step.order),
                    title: draft.title.clone(),
                    description: draft.description.clone(),
                    editing,
                },
                _ => StepRow {
                    id: step.id,
                    order: step.order,
                    title: step.title,
                    description: step.description,
                    editing,
                },
            }
        })
        .collect();

    render(StepsTemplate {
        ctx: ctx(state, auth, spec.tab).await,
        heading: spec.heading.to_string(),
        base_path: spec.base_path.to_string(),
        steps,
        draft,
    })
}

async fn process_tab(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
    query: web::Query<EditQuery>,
) -> Result<HttpResponse> {
    let editing = query.edit.map(|id| (id, None));
    Ok(render_steps_tab(&state, &auth, &PROCESS_SPEC, StepForm::default(), editing).await)
}

async fn why_tab(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
    query: web::Query<EditQuery>,
) -> Result<HttpResponse> {
    let editing = query.edit.map(|id| (id, None));
    Ok(render_steps_tab(&state, &auth, &WHY_SPEC, StepForm::default(), editing).await)
}

async fn create_process_step(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    form: web::Form<StepForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    state.banner.submitting("process", "Creating process step...").await;
    let existing = state
        .cached_list(CacheKey::ProcessSteps, state.api.fetch_process_steps())
        .await;
    let input = StepInput {
        order: existing.len() as i64 + 1,
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
    };
    let result = api.create_process_step(&input).await;
    if finish_mutation(
        &state,
        "process",
        result,
        &[CacheKey::ProcessSteps],
        "Process step added ✓",
    )
    .await
    {
        Ok(see_other("/admin/process"))
    } else {
        Ok(render_steps_tab(&state, &auth, &PROCESS_SPEC, form, None).await)
    }
}

async fn update_process_step(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    path: web::Path<i64>,
    form: web::Form<StepForm>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();
    state.banner.submitting("process", "Saving process step...").await;
    let input = StepInput {
        order: form.order.unwrap_or(1),
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
    };
    let result = api.update_process_step(id, &input).await;
    if finish_mutation(
        &state,
        "process",
        result,
        &[CacheKey::ProcessSteps],
        "Process step updated ✓",
    )
    .await
    {
        Ok(see_other("/admin/process"))
    } else {
        Ok(render_steps_tab(
            &state,
            &auth,
            &PROCESS_SPEC,
            StepForm::default(),
            Some((id, Some(form))),
        )
        .await)
    }
}

async fn delete_process_step(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    state.banner.submitting("process", "Deleting...").await;
    let result = api.delete_process_step(path.into_inner()).await;
    finish_mutation(
        &state,
        "process",
        result,
        &[CacheKey::ProcessSteps],
        "Process step deleted ✓",
    )
    .await;
    Ok(see_other("/admin/process"))
}

async fn create_why_item(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    form: web::Form<StepForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    state.banner.submitting("why-choose-us", "Creating item...").await;
    let existing = state
        .cached_list(CacheKey::WhyChooseUs, state.api.fetch_why_choose_us())
        .await;
    let input = StepInput {
        order: existing.len() as i64 + 1,
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
    };
    let result = api.create_why_choose_us(&input).await;
    if finish_mutation(&state, "why-choose-us", result, &[CacheKey::WhyChooseUs], "Item added ✓")
        .await
    {
        Ok(see_other("/admin/why-choose-us"))
    } else {
        Ok(render_steps_tab(&state, &auth, &WHY_SPEC, form, None).await)
    }
}

async fn update_why_item(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    path: web::Path<i64>,
    form: web::Form<StepForm>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();
    state.banner.submitting("why-choose-us", "Saving item...").await;
    let input = StepInput {
        order: form.order.unwrap_or(1),
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
    };
    let result = api.update_why_choose_us(id, &input).await;
    if finish_mutation(&state, "why-choose-us", result, &[CacheKey::WhyChooseUs], "Item updated ✓")
        .await
    {
        Ok(see_other("/admin/why-choose-us"))
    } else {
        Ok(render_steps_tab(
            &state,
            &auth,
            &WHY_SPEC,
            StepForm::default(),
            Some((id, Some(form))),
        )
        .await)
    }
}

async fn delete_why_item(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    state.banner.submitting("why-choose-us", "Deleting...").await;
    let result = api.delete_why_choose_us(path.into_inner()).await;
    finish_mutation(&state, "why-choose-us", result, &[CacheKey::WhyChooseUs], "Item deleted ✓")
        .await;
    Ok(see_other("/admin/why-choose-us"))
}

// ----------------------------------------------------------------- settings

#[derive(Clone, Default, Deserialize)]
struct SettingsForm {
    site_name: String,
    site_description: String,
    footer_text: String,
    company_email: String,
    company_phone: String,
    company_address: String,
    social_facebook: String,
    social_linkedin: String,
    social_twitter: String,
    logo_url: String,
    navbar_bg_color: String,
    navbar_text_color: String,
    preloader_enabled: Option<String>,
    preloader_text: String,
    preloader_duration: i64,
}

#[derive(Template)]
#[template(path = "admin_settings.html")]
struct SettingsTemplate {
    ctx: AdminCtx,
    draft: SettingsForm,
    preloader_on: bool,
}

async fn render_settings_tab(
    state: &AppState,
    auth: &AuthUser,
    draft: Option<SettingsForm>,
) -> HttpResponse {
    let draft = match draft {
        Some(draft) => draft,
        None => state
            .cached(CacheKey::SiteSettings, state.api.fetch_site_settings())
            .await
            .map(|s| SettingsForm {
                site_name: s.site_name.clone(),
                site_description: s.site_description.clone().unwrap_or_default(),
                footer_text: s.footer_text.clone().unwrap_or_default(),
                company_email: s.company_email.clone().unwrap_or_default(),
                company_phone: s.company_phone.clone().unwrap_or_default(),
                company_address: s.company_address.clone().unwrap_or_default(),
                social_facebook: s.social_facebook.clone().unwrap_or_default(),
                social_linkedin: s.social_linkedin.clone().unwrap_or_default(),
                social_twitter: s.social_twitter.clone().unwrap_or_default(),
                logo_url: s.logo_url.clone().unwrap_or_default(),
                navbar_bg_color: s
                    .navbar_bg_color
                    .clone()
                    .unwrap_or_else(|| "#ffffff".to_string()),
                navbar_text_color: s
                    .navbar_text_color
                    .clone()
                    .unwrap_or_else(|| "#111827".to_string()),
                preloader_enabled: s.preloader_enabled.then(|| "on".to_string()),
                preloader_text: s.preloader_text.clone().unwrap_or_default(),
                preloader_duration: s.preloader_duration.unwrap_or(2000),
            })
            .unwrap_or_default(),
    };
    let preloader_on = draft.preloader_enabled.is_some();
    render(SettingsTemplate {
        ctx: ctx(state, auth, "settings").await,
        draft,
        preloader_on,
    })
}

async fn settings_tab(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
) -> Result<HttpResponse> {
    Ok(render_settings_tab(&state, &auth, None).await)
}

async fn update_settings(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    form: web::Form<SettingsForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    state.banner.submitting("settings", "Saving settings...").await;
    let input = SiteSettingsInput {
        site_name: form.site_name.trim().to_string(),
        site_description: form.site_description.trim().to_string(),
        footer_text: form.footer_text.trim().to_string(),
        company_email: form.company_email.trim().to_string(),
        company_phone: form.company_phone.trim().to_string(),
        company_address: form.company_address.trim().to_string(),
        social_facebook: form.social_facebook.trim().to_string(),
        social_linkedin: form.social_linkedin.trim().to_string(),
        social_twitter: form.social_twitter.trim().to_string(),
        logo_url: form.logo_url.trim().to_string(),
        navbar_bg_color: form.navbar_bg_color.trim().to_string(),
        navbar_text_color: form.navbar_text_color.trim().to_string(),
        preloader_enabled: form.preloader_enabled.is_some(),
        preloader_text: form.preloader_text.trim().to_string(),
        preloader_duration: form.preloader_duration,
    };
    let result = api.update_site_settings(&input).await;
    if finish_mutation(
        &state,
        "settings",
        result,
        &[CacheKey::SiteSettings],
        "Settings updated ✓",
    )
    .await
    {
        Ok(see_other("/admin/settings"))
    } else {
        Ok(render_settings_tab(&state, &auth, Some(form)).await)
    }
}

// ----------------------------------------------------------------- services

#[derive(Clone, Default, Deserialize)]
struct ServiceForm {
    title: String,
    summary: String,
    description: String,
}

#[derive(Clone, Debug)]
struct ServiceRow {
    id: i64,
    title: String,
    summary: String,
    description: String,
    editing: bool,
}

#[derive(Template)]
#[template(path = "admin_services.html")]
struct ServicesTabTemplate {
    ctx: AdminCtx,
    services: Vec<ServiceRow>,
    draft: ServiceForm,
}

async fn render_services_tab(
    state: &AppState,
    auth: &AuthUser,
    draft: ServiceForm,
    editing: Option<(i64, Option<ServiceForm>)>,
) -> HttpResponse {
    let services = state
        .cached_list(CacheKey::Services, state.api.fetch_services())
        .await;
    let (editing_id, edit_draft) = match editing {
        Some((id, draft)) => (Some(id), draft),
        None => (None, None),
    };
    let services = services
        .into_iter()
        .map(|service| {
            let editing = editing_id == Some(service.id);
            match (&edit_draft, editing) {
                (Some(draft), true) => ServiceRow {
                    id: service.id,
                    title: draft.title.clone(),
                    summary: draft.summary.clone(),
                    description: draft.description.clone(),
                    editing,
                },
                _ => ServiceRow {
                    id: service.id,
                    title: service.title,
                    summary: service.summary,
                    description: service.description,
                    editing,
                },
            }
        })
        .collect();
    render(ServicesTabTemplate {
        ctx: ctx(state, auth, "services").await,
        services,
        draft,
    })
}

async fn services_tab(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
    query: web::Query<EditQuery>,
) -> Result<HttpResponse> {
    let editing = query.edit.map(|id| (id, None));
    Ok(render_services_tab(&state, &auth, ServiceForm::default(), editing).await)
}

async fn create_service(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    form: web::Form<ServiceForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    state.banner.submitting("services", "Creating service...").await;
    let input = ServiceInput {
        title: form.title.trim().to_string(),
        summary: form.summary.trim().to_string(),
        description: form.description.trim().to_string(),
    };
    let result = api.create_service(&input).await;
    if finish_mutation(&state, "services", result, &[CacheKey::Services], "Service added ✓").await {
        Ok(see_other("/admin/services"))
    } else {
        Ok(render_services_tab(&state, &auth, form, None).await)
    }
}

async fn update_service(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    path: web::Path<i64>,
    form: web::Form<ServiceForm>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();
    state.banner.submitting("services", "Saving service...").await;
    let input = ServiceInput {
        title: form.title.trim().to_string(),
        summary: form.summary.trim().to_string(),
        description: form.description.trim().to_string(),
    };
    let result = api.update_service(id, &input).await;
    if finish_mutation(&state, "services", result, &[CacheKey::Services], "Service updated ✓")
        .await
    {
        Ok(see_other("/admin/services"))
    } else {
        Ok(render_services_tab(
            &state,
            &auth,
            ServiceForm::default(),
            Some((id, Some(form))),
        )
        .await)
    }
}

async fn delete_service(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    state.banner.submitting("services", "Deleting...").await;
    let result = api.delete_service(path.into_inner()).await;
    finish_mutation(&state, "services", result, &[CacheKey::Services], "Service deleted ✓").await;
    Ok(see_other("/admin/services"))
}

// ----------------------------------------------------------------- projects

#[derive(Clone, Default, Deserialize)]
struct ProjectForm {
    title: String,
    summary: String,
    tags: String,
    live_url: String,
    repo_url: String,
}

#[derive(Clone, Debug)]
struct ProjectRow {
    id: i64,
    title: String,
    summary: String,
    tags: String,
    live_url: String,
    repo_url: String,
    editing: bool,
}

#[derive(Template)]
#[template(path = "admin_projects.html")]
struct ProjectsTabTemplate {
    ctx: AdminCtx,
    projects: Vec<ProjectRow>,
    draft: ProjectForm,
}

async fn render_projects_tab(
    state: &AppState,
    auth: &AuthUser,
    draft: ProjectForm,
    editing: Option<(i64, Option<ProjectForm>)>,
) -> HttpResponse {
    let projects = state
        .cached_list(CacheKey::Projects, state.api.fetch_projects())
        .await;
    let (editing_id, edit_draft) = match editing {
        Some((id, draft)) => (Some(id), draft),
        None => (None, None),
    };
    let projects = projects
        .into_iter()
        .map(|project| {
            let editing = editing_id == Some(project.id);
            match (&edit_draft, editing) {
                (Some(draft), true) => ProjectRow {
                    id: project.id,
                    title: draft.title.clone(),
                    summary: draft.summary.clone(),
                    tags: draft.tags.clone(),
                    live_url: draft.live_url.clone(),
                    repo_url: draft.repo_url.clone(),
                    editing,
                },
                _ => ProjectRow {
                    id: project.id,
                    title: project.title,
                    summary: project.summary,
                    tags: project.tags.unwrap_or_default(),
                    live_url: project.live_url.unwrap_or_default(),
                    repo_url: project.repo_url.unwrap_or_default(),
                    editing,
                },
            }
        })
        .collect();
    render(ProjectsTabTemplate {
        ctx: ctx(state, auth, "projects").await,
        projects,
        draft,
    })
}

async fn projects_tab(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
    query: web::Query<EditQuery>,
) -> Result<HttpResponse> {
    let editing = query.edit.map(|id| (id, None));
    Ok(render_projects_tab(&state, &auth, ProjectForm::default(), editing).await)
}

fn project_input(form: &ProjectForm) -> ProjectInput {
    ProjectInput {
        title: form.title.trim().to_string(),
        summary: form.summary.trim().to_string(),
        tags: opt(form.tags.clone()),
        live_url: opt(form.live_url.clone()),
        repo_url: opt(form.repo_url.clone()),
    }
}

async fn create_project(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    form: web::Form<ProjectForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    state.banner.submitting("projects", "Creating project...").await;
    let result = api.create_project(&project_input(&form)).await;
    if finish_mutation(&state, "projects", result, &[CacheKey::Projects], "Project added ✓").await {
        Ok(see_other("/admin/projects"))
    } else {
        Ok(render_projects_tab(&state, &auth, form, None).await)
    }
}

async fn update_project(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    path: web::Path<i64>,
    form: web::Form<ProjectForm>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();
    state.banner.submitting("projects", "Saving project...").await;
    let result = api.update_project(id, &project_input(&form)).await;
    if finish_mutation(&state, "projects", result, &[CacheKey::Projects], "Project updated ✓")
        .await
    {
        Ok(see_other("/admin/projects"))
    } else {
        Ok(render_projects_tab(
            &state,
            &auth,
            ProjectForm::default(),
            Some((id, Some(form))),
        )
        .await)
    }
}

async fn delete_project(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    state.banner.submitting("projects", "Deleting...").await;
    let result = api.delete_project(path.into_inner()).await;
    finish_mutation(&state, "projects", result, &[CacheKey::Projects], "Project deleted ✓").await;
    Ok(see_other("/admin/projects"))
}

// ------------------------------------------------------------- testimonials

#[derive(Clone, Deserialize)]
struct TestimonialForm {
    client_name: String,
    company: String,
    message: String,
    rating: i64,
}

impl Default for TestimonialForm {
    fn default() -> Self {
        Self {
            client_name: String::new(),
            company: String::new(),
            message: String::new(),
            rating: 5,
        }
    }
}

#[derive(Clone, Debug)]
struct TestimonialRow {
    id: i64,
    client_name: String,
    company: String,
    message: String,
    rating: i64,
    editing: bool,
}

#[derive(Template)]
#[template(path = "admin_testimonials.html")]
struct TestimonialsTabTemplate {
    ctx: AdminCtx,
    testimonials: Vec<TestimonialRow>,
    draft: TestimonialForm,
}

async fn render_testimonials_tab(
    state: &AppState,
    auth: &AuthUser,
    draft: TestimonialForm,
    editing: Option<(i64, Option<TestimonialForm>)>,
) -> HttpResponse {
    let testimonials = state
        .cached_list(CacheKey::Testimonials, state.api.fetch_testimonials())
        .await;
    let (editing_id, edit_draft) = match editing {
        Some((id, draft)) => (Some(id), draft),
        None => (None, None),
    };
    let testimonials = testimonials
        .into_iter()
        .map(|testimonial| {
            let editing = editing_id == Some(testimonial.id);
            match (&edit_draft, editing) {
                (Some(draft), true) => TestimonialRow {
                    id: testimonial.id,
                    client_name: draft.client_name.clone(),
                    company: draft.company.clone(),
                    message: draft.message.clone(),
                    rating: draft.rating,
                    editing,
                },
                _ => TestimonialRow {
                    id: testimonial.id,
                    client_name: testimonial.client_name,
                    company: testimonial.company.unwrap_or_default(),
                    message: testimonial.message,
                    rating: testimonial.rating,
                    editing,
                },
            }
        })
        .collect();
    render(TestimonialsTabTemplate {
        ctx: ctx(state, auth, "testimonials").await,
        testimonials,
        draft,
    })
}

async fn testimonials_tab(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
    query: web::Query<EditQuery>,
) -> Result<HttpResponse> {
    let editing = query.edit.map(|id| (id, None));
    Ok(render_testimonials_tab(&state, &auth, TestimonialForm::default(), editing).await)
}

fn testimonial_input(form: &TestimonialForm) -> TestimonialInput {
    TestimonialInput {
        client_name: form.client_name.trim().to_string(),
        company: opt(form.company.clone()),
        message: form.message.trim().to_string(),
        rating: form.rating.clamp(1, 5),
    }
}

async fn create_testimonial(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    form: web::Form<TestimonialForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    state.banner.submitting("testimonials", "Creating testimonial...").await;
    let result = api.create_testimonial(&testimonial_input(&form)).await;
    if finish_mutation(
        &state,
        "testimonials",
        result,
        &[CacheKey::Testimonials],
        "Testimonial added ✓",
    )
    .await
    {
        Ok(see_other("/admin/testimonials"))
    } else {
        Ok(render_testimonials_tab(&state, &auth, form, None).await)
    }
}

async fn update_testimonial(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    path: web::Path<i64>,
    form: web::Form<TestimonialForm>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();
    state.banner.submitting("testimonials", "Saving testimonial...").await;
    let result = api.update_testimonial(id, &testimonial_input(&form)).await;
    if finish_mutation(
        &state,
        "testimonials",
        result,
        &[CacheKey::Testimonials],
        "Testimonial updated ✓",
    )
    .await
    {
        Ok(see_other("/admin/testimonials"))
    } else {
        Ok(render_testimonials_tab(
            &state,
            &auth,
            TestimonialForm::default(),
            Some((id, Some(form))),
        )
        .await)
    }
}

async fn delete_testimonial(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    state.banner.submitting("testimonials", "Deleting...").await;
    let result = api.delete_testimonial(path.into_inner()).await;
    finish_mutation(
        &state,
        "testimonials",
        result,
        &[CacheKey::Testimonials],
        "Testimonial deleted ✓",
    )
    .await;
    Ok(see_other("/admin/testimonials"))
}

// ----------------------------------------------------------------- partners

#[derive(Clone, Default, Deserialize)]
struct PartnerForm {
    name: String,
    logo_url: String,
    website_url: String,
    is_active: Option<String>,
}

#[derive(Clone, Debug)]
struct PartnerRow {
    id: i64,
    name: String,
    logo_url: String,
    website_url: String,
    order: i64,
    is_active: bool,
    editing: bool,
}

#[derive(Template)]
#[template(path = "admin_partners.html")]
struct PartnersTabTemplate {
    ctx: AdminCtx,
    partners: Vec<PartnerRow>,
    draft: PartnerForm,
}

async fn render_partners_tab(
    state: &AppState,
    auth: &AuthUser,
    draft: PartnerForm,
    editing: Option<(i64, Option<PartnerForm>)>,
) -> HttpResponse {
    let mut partners = state
        .cached_list(CacheKey::Partners, state.api.fetch_partners())
        .await;
    partners.sort_by_key(|partner| partner.order);
    let (editing_id, edit_draft) = match editing {
        Some((id, draft)) => (Some(id), draft),
        None => (None, None),
    };
    let partners = partners
        .into_iter()
        .map(|partner| {
            let editing = editing_id == Some(partner.id);
            match (&edit_draft, editing) {
                (Some(draft), true) => PartnerRow {
                    id: partner.id,
                    name: draft.name.clone(),
                    logo_url: draft.logo_url.clone(),
                    website_url: draft.website_url.clone(),
                    order: partner.order,
                    is_active: draft.is_active.is_some(),
                    editing,
                },
                _ => PartnerRow {
                    id: partner.id,
                    name: partner.name,
                    logo_url: partner.logo_url.unwrap_or_default(),
                    website_url: partner.website_url.unwrap_or_default(),
                    order: partner.order,
                    is_active: partner.is_active,
                    editing,
                },
            }
        })
        .collect();
    render(PartnersTabTemplate {
        ctx: ctx(state, auth, "partners").await,
        partners,
        draft,
    })
}

async fn partners_tab(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
    query: web::Query<EditQuery>,
) -> Result<HttpResponse> {
    let editing = query.edit.map(|id| (id, None));
    Ok(render_partners_tab(&state, &auth, PartnerForm::default(), editing).await)
}

async fn create_partner(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    form: web::Form<PartnerForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    state.banner.submitting("partners", "Creating partner...").await;
    let existing = state
        .cached_list(CacheKey::Partners, state.api.fetch_partners())
        .await;
    let input = PartnerInput {
        name: form.name.trim().to_string(),
        logo_url: opt(form.logo_url.clone()),
        website_url: opt(form.website_url.clone()),
        order: existing.len() as i64 + 1,
        is_active: true,
    };
    let result = api.create_partner(&input).await;
    if finish_mutation(&state, "partners", result, &[CacheKey::Partners], "Partner added ✓").await {
        Ok(see_other("/admin/partners"))
    } else {
        Ok(render_partners_tab(&state, &auth, form, None).await)
    }
}

async fn update_partner(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    path: web::Path<i64>,
    form: web::Form<PartnerForm>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();
    state.banner.submitting("partners", "Saving partner...").await;
    let partners = state
        .cached_list(CacheKey::Partners, state.api.fetch_partners())
        .await;
    let order = partners
        .iter()
        .find(|partner| partner.id == id)
        .map(|partner| partner.order)
        .unwrap_or(1);
    let input = PartnerInput {
        name: form.name.trim().to_string(),
        logo_url: opt(form.logo_url.clone()),
        website_url: opt(form.website_url.clone()),
        order,
        is_active: form.is_active.is_some(),
    };
    let result = api.update_partner(id, &input).await;
    if finish_mutation(&state, "partners", result, &[CacheKey::Partners], "Partner updated ✓")
        .await
    {
        Ok(see_other("/admin/partners"))
    } else {
        Ok(render_partners_tab(
            &state,
            &auth,
            PartnerForm::default(),
            Some((id, Some(form))),
        )
        .await)
    }
}

async fn delete_partner(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    state.banner.submitting("partners", "Deleting...").await;
    let result = api.delete_partner(path.into_inner()).await;
    finish_mutation(&state, "partners", result, &[CacheKey::Partners], "Partner deleted ✓").await;
    Ok(see_other("/admin/partners"))
}

// -------------------------------------------------------------------- pages

#[derive(Clone, Default, Deserialize)]
struct PageForm {
    title: String,
    slug: String,
    content: String,
}

#[derive(Clone, Debug)]
struct PageRow {
    id: i64,
    title: String,
    slug: String,
    content: String,
    editing: bool,
}

#[derive(Template)]
#[template(path = "admin_pages.html")]
struct PagesTabTemplate {
    ctx: AdminCtx,
    pages: Vec<PageRow>,
    draft: PageForm,
}

async fn render_pages_tab(
    state: &AppState,
    auth: &AuthUser,
    draft: PageForm,
    editing: Option<(i64, Option<PageForm>)>,
) -> HttpResponse {
    let pages = state
        .cached_list(CacheKey::Pages, state.api.fetch_pages())
        .await;
    let (editing_id, edit_draft) = match editing {
        Some((id, draft)) => (Some(id), draft),
        None => (None, None),
    };
    let pages = pages
        .into_iter()
        .map(|page| {
            let editing = editing_id == Some(page.id);
            match (&edit_draft, editing) {
                (Some(draft), true) => PageRow {
                    id: page.id,
                    title: draft.title.clone(),
                    slug: draft.slug.clone(),
                    content: draft.content.clone(),
                    editing,
                },
                _ => PageRow {
                    id: page.id,
                    title: page.title,
                    slug: page.slug,
                    content: page.content,
                    editing,
                },
            }
        })
        .collect();
    render(PagesTabTemplate {
        ctx: ctx(state, auth, "pages").await,
        pages,
        draft,
    })
}

async fn pages_tab(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
    query: web::Query<EditQuery>,
) -> Result<HttpResponse> {
    let editing = query.edit.map(|id| (id, None));
    Ok(render_pages_tab(&state, &auth, PageForm::default(), editing).await)
}

fn page_input(form: &PageForm) -> PageInput {
    PageInput {
        title: form.title.trim().to_string(),
        slug: form.slug.trim().to_string(),
        content: form.content.clone(),
    }
}

async fn create_page(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    form: web::Form<PageForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    state.banner.submitting("pages", "Creating page...").await;
    let result = api.create_page(&page_input(&form)).await;
    if finish_mutation(&state, "pages", result, &[CacheKey::Pages], "Page added ✓").await {
        Ok(see_other("/admin/pages"))
    } else {
        Ok(render_pages_tab(&state, &auth, form, None).await)
    }
}

async fn update_page(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    path: web::Path<i64>,
    form: web::Form<PageForm>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();
    state.banner.submitting("pages", "Saving page...").await;
    let result = api.update_page(id, &page_input(&form)).await;
    if finish_mutation(&state, "pages", result, &[CacheKey::Pages], "Page updated ✓").await {
        Ok(see_other("/admin/pages"))
    } else {
        Ok(render_pages_tab(
            &state,
            &auth,
            PageForm::default(),
            Some((id, Some(form))),
        )
        .await)
    }
}

async fn delete_page(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    state.banner.submitting("pages", "Deleting...").await;
    let result = api.delete_page(path.into_inner()).await;
    finish_mutation(&state, "pages", result, &[CacheKey::Pages], "Page deleted ✓").await;
    Ok(see_other("/admin/pages"))
}

async fn seed_pages(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
) -> Result<HttpResponse> {
    state.banner.submitting("pages", "Seeding pages...").await;
    let result = api.seed_pages().await;
    finish_mutation(&state, "pages", result, &[CacheKey::Pages], "Default pages seeded ✓").await;
    Ok(see_other("/admin/pages"))
}

// ------------------------------------------------------------------- navbar

#[derive(Clone, Default, Deserialize)]
struct MenuItemForm {
    label: String,
    path: String,
    open_in_new_tab: Option<String>,
}

#[derive(Clone, Debug)]
struct MenuItemRow {
    id: i64,
    label: String,
    path: String,
    order: i64,
    open_in_new_tab: bool,
}

#[derive(Template)]
#[template(path = "admin_navbar.html")]
struct NavbarTabTemplate {
    ctx: AdminCtx,
    items: Vec<MenuItemRow>,
    draft: MenuItemForm,
}

async fn render_navbar_tab(
    state: &AppState,
    auth: &AuthUser,
    draft: MenuItemForm,
) -> HttpResponse {
    let mut items = state
        .cached_list(CacheKey::NavbarMenu, state.api.fetch_navbar_menu())
        .await;
    items.sort_by_key(|item| item.order);
    let items = items
        .into_iter()
        .map(|item| MenuItemRow {
            id: item.id,
            label: item.label,
            path: item.path,
            order: item.order,
            open_in_new_tab: item.open_in_new_tab,
        })
        .collect();
    render(NavbarTabTemplate {
        ctx: ctx(state, auth, "navbar").await,
        items,
        draft,
    })
}

async fn navbar_tab(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
) -> Result<HttpResponse> {
    Ok(render_navbar_tab(&state, &auth, MenuItemForm::default()).await)
}

async fn create_menu_item(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    form: web::Form<MenuItemForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    state.banner.submitting("navbar", "Adding menu item...").await;
    let existing = state
        .cached_list(CacheKey::NavbarMenu, state.api.fetch_navbar_menu())
        .await;
    let input = MenuItemInput {
        label: form.label.trim().to_string(),
        path: form.path.trim().to_string(),
        order: existing.len() as i64 + 1,
        open_in_new_tab: form.open_in_new_tab.is_some(),
    };
    let result = api.create_menu_item(&input).await;
    if finish_mutation(&state, "navbar", result, &[CacheKey::NavbarMenu], "Menu item added ✓")
        .await
    {
        Ok(see_other("/admin/navbar"))
    } else {
        Ok(render_navbar_tab(&state, &auth, form).await)
    }
}

async fn delete_menu_item(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    state.banner.submitting("navbar", "Deleting...").await;
    let result = api.delete_menu_item(path.into_inner()).await;
    finish_mutation(&state, "navbar", result, &[CacheKey::NavbarMenu], "Menu item deleted ✓")
        .await;
    Ok(see_other("/admin/navbar"))
}

async fn seed_navbar(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
) -> Result<HttpResponse> {
    state.banner.submitting("navbar", "Seeding menu...").await;
    let result = api.seed_navbar_menu().await;
    finish_mutation(&state, "navbar", result, &[CacheKey::NavbarMenu], "Default menu seeded ✓")
        .await;
    Ok(see_other("/admin/navbar"))
}

// -------------------------------------------------------------------- users

#[derive(Clone, Default, Deserialize)]
struct UserForm {
    email: String,
    full_name: String,
    role: String,
    password: String,
}

#[derive(Clone, Debug)]
struct RoleOption {
    value: String,
    selected: bool,
}

#[derive(Clone, Debug)]
struct UserRow {
    id: i64,
    email: String,
    full_name: String,
    role: String,
    roles: Vec<RoleOption>,
    editing: bool,
}

#[derive(Template)]
#[template(path = "admin_users.html")]
struct UsersTabTemplate {
    ctx: AdminCtx,
    users: Vec<UserRow>,
    draft: UserForm,
    roles: Vec<RoleOption>,
}

fn role_options(selected: &str) -> Vec<RoleOption> {
    ROLES
        .iter()
        .map(|role| RoleOption {
            value: role.to_string(),
            selected: *role == selected,
        })
        .collect()
}

async fn render_users_tab(
    state: &AppState,
    api: &ApiClient,
    auth: &AuthUser,
    draft: UserForm,
    editing: Option<(i64, Option<UserForm>)>,
) -> HttpResponse {
    // The users list is the one read that needs the caller's token.
    let users = state.cached_list(CacheKey::Users, api.fetch_users()).await;
    let (editing_id, edit_draft) = match editing {
        Some((id, draft)) => (Some(id), draft),
        None => (None, None),
    };
    let users = users
        .into_iter()
        .map(|user| {
            let editing = editing_id == Some(user.id);
            match (&edit_draft, editing) {
                (Some(draft), true) => UserRow {
                    id: user.id,
                    email: draft.email.clone(),
                    full_name: draft.full_name.clone(),
                    roles: role_options(&draft.role),
                    role: draft.role.clone(),
                    editing,
                },
                _ => UserRow {
                    id: user.id,
                    email: user.email,
                    full_name: user.full_name.unwrap_or_default(),
                    roles: role_options(&user.role),
                    role: user.role,
                    editing,
                },
            }
        })
        .collect();
    let draft_roles = role_options(&draft.role);
    render(UsersTabTemplate {
        ctx: ctx(state, auth, "users").await,
        users,
        draft,
        roles: draft_roles,
    })
}

async fn users_tab(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    query: web::Query<EditQuery>,
) -> Result<HttpResponse> {
    let editing = query.edit.map(|id| (id, None));
    Ok(render_users_tab(&state, &api, &auth, UserForm::default(), editing).await)
}

async fn create_user(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    form: web::Form<UserForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    state.banner.submitting("users", "Creating user...").await;
    let input = UserCreateInput {
        email: form.email.trim().to_string(),
        password: form.password.clone(),
        full_name: form.full_name.trim().to_string(),
        role: form.role.clone(),
    };
    let result = api.create_user(&input).await;
    if finish_mutation(&state, "users", result, &[CacheKey::Users], "User added ✓").await {
        Ok(see_other("/admin/users"))
    } else {
        Ok(render_users_tab(&state, &api, &auth, form, None).await)
    }
}

async fn update_user(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    path: web::Path<i64>,
    form: web::Form<UserForm>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();
    state.banner.submitting("users", "Saving user...").await;
    let input = UserUpdateInput {
        email: form.email.trim().to_string(),
        full_name: form.full_name.trim().to_string(),
        role: form.role.clone(),
        password: opt(form.password.clone()),
    };
    let result = api.update_user(id, &input).await;
    if finish_mutation(&state, "users", result, &[CacheKey::Users], "User updated ✓").await {
        Ok(see_other("/admin/users"))
    } else {
        Ok(render_users_tab(
            &state,
            &api,
            &auth,
            UserForm::default(),
            Some((id, Some(form))),
        )
        .await)
    }
}

async fn delete_user(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    state.banner.submitting("users", "Deleting...").await;
    let result = api.delete_user(path.into_inner()).await;
    finish_mutation(&state, "users", result, &[CacheKey::Users], "User deleted ✓").await;
    Ok(see_other("/admin/users"))
}

// --------------------------------------------------------------------- team

#[derive(Clone, Default, Deserialize)]
struct TeamForm {
    name: String,
    designation: String,
    category: String,
    image_url: String,
    email: String,
    linkedin: String,
    twitter: String,
    facebook: String,
    instagram: String,
    bio: String,
    display_order: i64,
}

#[derive(Clone, Debug)]
struct TeamRow {
    id: i64,
    name: String,
    designation: String,
    category: String,
    image_url: String,
    email: String,
    linkedin: String,
    twitter: String,
    facebook: String,
    instagram: String,
    bio: String,
    display_order: i64,
    editing: bool,
}

#[derive(Template)]
#[template(path = "admin_team.html")]
struct TeamTabTemplate {
    ctx: AdminCtx,
    members: Vec<TeamRow>,
    draft: TeamForm,
}

async fn render_team_tab(
    state: &AppState,
    auth: &AuthUser,
    draft: TeamForm,
    editing: Option<(i64, Option<TeamForm>)>,
) -> HttpResponse {
    let mut members = state
        .cached_list(CacheKey::Team, state.api.fetch_team())
        .await;
    members.sort_by_key(|member| member.display_order);
    let (editing_id, edit_draft) = match editing {
        Some((id, draft)) => (Some(id), draft),
        None => (None, None),
    };
    let members = members
        .into_iter()
        .map(|member| {
            let editing = editing_id == Some(member.id);
            match (&edit_draft, editing) {
                (Some(draft), true) => TeamRow {
                    id: member.id,
                    name: draft.name.clone(),
                    designation: draft.designation.clone(),
                    category: draft.category.clone(),
                    image_url: draft.image_url.clone(),
                    email: draft.email.clone(),
                    linkedin: draft.linkedin.clone(),
                    twitter: draft.twitter.clone(),
                    facebook: draft.facebook.clone(),
                    instagram: draft.instagram.clone(),
                    bio: draft.bio.clone(),
                    display_order: draft.display_order,
                    editing,
                },
                _ => TeamRow {
                    id: member.id,
                    name: member.name,
                    designation: member.designation,
                    category: member.category,
                    image_url: member.image_url.unwrap_or_default(),
                    email: member.email.unwrap_or_default(),
                    linkedin: member.linkedin.unwrap_or_default(),
                    twitter: member.twitter.unwrap_or_default(),
                    facebook: member.facebook.unwrap_or_default(),
                    instagram: member.instagram.unwrap_or_default(),
                    bio: member.bio.unwrap_or_default(),
                    display_order: member.display_order,
                    editing,
                },
            }
        })
        .collect();
    render(TeamTabTemplate {
        ctx: ctx(state, auth, "team").await,
        members,
        draft,
    })
}

async fn team_tab(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
    query: web::Query<EditQuery>,
) -> Result<HttpResponse> {
    let editing = query.edit.map(|id| (id, None));
    Ok(render_team_tab(&state, &auth, TeamForm::default(), editing).await)
}

fn team_input(form: &TeamForm) -> TeamMemberInput {
    TeamMemberInput {
        name: form.name.trim().to_string(),
        designation: form.designation.trim().to_string(),
        category: form.category.trim().to_string(),
        image_url: opt(form.image_url.clone()),
        email: opt(form.email.clone()),
        linkedin: opt(form.linkedin.clone()),
        twitter: opt(form.twitter.clone()),
        facebook: opt(form.facebook.clone()),
        instagram: opt(form.instagram.clone()),
        bio: opt(form.bio.clone()),
        display_order: form.display_order,
    }
}

async fn create_team_member(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    form: web::Form<TeamForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    state.banner.submitting("team", "Creating team member...").await;
    let result = api.create_team_member(&team_input(&form)).await;
    if finish_mutation(
        &state,
        "team",
        result,
        &[CacheKey::Team, CacheKey::TeamCategories],
        "Team member added ✓",
    )
    .await
    {
        Ok(see_other("/admin/team"))
    } else {
        Ok(render_team_tab(&state, &auth, form, None).await)
    }
}

async fn update_team_member(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    path: web::Path<i64>,
    form: web::Form<TeamForm>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();
    state.banner.submitting("team", "Saving team member...").await;
    let result = api.update_team_member(id, &team_input(&form)).await;
    if finish_mutation(
        &state,
        "team",
        result,
        &[CacheKey::Team, CacheKey::TeamCategories],
        "Team member updated ✓",
    )
    .await
    {
        Ok(see_other("/admin/team"))
    } else {
        Ok(render_team_tab(
            &state,
            &auth,
            TeamForm::default(),
            Some((id, Some(form))),
        )
        .await)
    }
}

async fn delete_team_member(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    state.banner.submitting("team", "Deleting...").await;
    let result = api.delete_team_member(path.into_inner()).await;
    finish_mutation(
        &state,
        "team",
        result,
        &[CacheKey::Team, CacheKey::TeamCategories],
        "Team member deleted ✓",
    )
    .await;
    Ok(see_other("/admin/team"))
}

// -------------------------------------------------------------------- theme

#[derive(Clone, Default, Deserialize)]
struct ThemeForm {
    primary_color: String,
    secondary_color: String,
    accent_color: String,
    surface_color: String,
    neutral_color: String,
    dark_mode: Option<String>,
}

#[derive(Template)]
#[template(path = "admin_theme.html")]
struct ThemeTabTemplate {
    ctx: AdminCtx,
    draft: ThemeForm,
    dark_mode_on: bool,
}

async fn render_theme_tab(
    state: &AppState,
    auth: &AuthUser,
    draft: Option<ThemeForm>,
) -> HttpResponse {
    let draft = match draft {
        Some(draft) => draft,
        None => state
            .cached(CacheKey::Theme, state.api.fetch_theme())
            .await
            .map(|theme| ThemeForm {
                primary_color: theme.primary_color.clone(),
                secondary_color: theme.secondary_color.clone(),
                accent_color: theme.accent_color.clone(),
                surface_color: theme.surface_color.clone(),
                neutral_color: theme.neutral_color.clone(),
                dark_mode: theme.dark_mode.then(|| "on".to_string()),
            })
            .unwrap_or_default(),
    };
    let dark_mode_on = draft.dark_mode.is_some();
    render(ThemeTabTemplate {
        ctx: ctx(state, auth, "theme").await,
        draft,
        dark_mode_on,
    })
}

async fn theme_tab(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
) -> Result<HttpResponse> {
    Ok(render_theme_tab(&state, &auth, None).await)
}

async fn update_theme(
    state: web::Data<AppState>,
    api: web::ReqData<ApiClient>,
    auth: web::ReqData<AuthUser>,
    form: web::Form<ThemeForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    state.banner.submitting("theme", "Saving theme...").await;
    let input = ThemeInput {
        primary_color: form.primary_color.trim().to_string(),
        secondary_color: form.secondary_color.trim().to_string(),
        accent_color: form.accent_color.trim().to_string(),
        surface_color: form.surface_color.trim().to_string(),
        neutral_color: form.neutral_color.trim().to_string(),
        dark_mode: form.dark_mode.is_some(),
    };
    let result = api.update_theme(&input).await;
    if finish_mutation(&state, "theme", result, &[CacheKey::Theme], "Theme updated ✓").await {
        Ok(see_other("/admin/theme"))
    } else {
        Ok(render_theme_tab(&state, &auth, Some(form)).await)
    }
}
