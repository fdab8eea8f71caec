use actix_web::{http::header, web, HttpRequest, HttpResponse, Result};
use askama::Template;
use serde::Deserialize;

use crate::{
    cache::CacheKey,
    models::{OrderedStep, SiteSettings},
    preloader::{self, PreloaderView},
    session,
    state::AppState,
    status,
    templates::{render, render_not_found},
};

/// Data every page shares: navbar, footer, and the theme variables applied
/// at document level.
#[derive(Clone, Debug)]
pub struct Layout {
    pub site_name: String,
    pub logo_url: String,
    pub has_logo: bool,
    pub navbar_bg: String,
    pub navbar_text: String,
    pub nav_items: Vec<NavLink>,
    pub footer_text: String,
    pub company_email: String,
    pub company_phone: String,
    pub company_address: String,
    pub social_facebook: String,
    pub social_linkedin: String,
    pub social_twitter: String,
    pub theme: ThemeVars,
}

#[derive(Clone, Debug)]
pub struct NavLink {
    pub label: String,
    pub path: String,
    pub new_tab: bool,
}

#[derive(Clone, Debug)]
pub struct ThemeVars {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub surface: String,
    pub neutral: String,
    pub dark_mode: bool,
}

impl Default for ThemeVars {
    fn default() -> Self {
        Self {
            primary: "#2563eb".to_string(),
            secondary: "#0f172a".to_string(),
            accent: "#f59e0b".to_string(),
            surface: "#ffffff".to_string(),
            neutral: "#64748b".to_string(),
            dark_mode: false,
        }
    }
}

fn default_nav() -> Vec<NavLink> {
    [
        ("Home", "/"),
        ("Services", "/services"),
        ("Projects", "/projects"),
        ("Testimonials", "/testimonials"),
        ("Our Management", "/our-management"),
        ("Contact", "/contact"),
    ]
    .into_iter()
    .map(|(label, path)| NavLink {
        label: label.to_string(),
        path: path.to_string(),
        new_tab: false,
    })
    .collect()
}

/// Compose the shared layout from site settings, the navbar menu, and the
/// theme, each read through the cache and degrading to defaults.
pub async fn layout(state: &AppState) -> Layout {
    let (settings, menu, theme) = tokio::join!(
        state.cached(CacheKey::SiteSettings, state.api.fetch_site_settings()),
        state.cached_list(CacheKey::NavbarMenu, state.api.fetch_navbar_menu()),
        state.cached(CacheKey::Theme, state.api.fetch_theme()),
    );

    let mut nav_items: Vec<NavLink> = {
        let mut menu = menu;
        menu.sort_by_key(|item| item.order);
        menu.into_iter()
            .map(|item| NavLink {
                label: item.label,
                path: item.path,
                new_tab: item.open_in_new_tab,
            })
            .collect()
    };
    if nav_items.is_empty() {
        nav_items = default_nav();
    }

    let theme = theme
        .map(|theme| ThemeVars {
            primary: theme.primary_color.clone(),
            secondary: theme.secondary_color.clone(),
            accent: theme.accent_color.clone(),
            surface: theme.surface_color.clone(),
            neutral: theme.neutral_color.clone(),
            dark_mode: theme.dark_mode,
        })
        .unwrap_or_default();

    match settings.as_deref() {
        Some(settings) => Layout {
            site_name: settings.site_name.clone(),
            has_logo: settings.logo_url.as_deref().is_some_and(|u| !u.is_empty()),
            logo_url: settings.logo_url.clone().unwrap_or_default(),
            navbar_bg: settings
                .navbar_bg_color
                .clone()
                .unwrap_or_else(|| "#ffffff".to_string()),
            navbar_text: settings
                .navbar_text_color
                .clone()
                .unwrap_or_else(|| "#111827".to_string()),
            nav_items,
            footer_text: settings.footer_text.clone().unwrap_or_default(),
            company_email: settings.company_email.clone().unwrap_or_default(),
            company_phone: settings.company_phone.clone().unwrap_or_default(),
            company_address: settings.company_address.clone().unwrap_or_default(),
            social_facebook: settings.social_facebook.clone().unwrap_or_default(),
            social_linkedin: settings.social_linkedin.clone().unwrap_or_default(),
            social_twitter: settings.social_twitter.clone().unwrap_or_default(),
            theme,
        },
        None => Layout {
            site_name: preloader::DEFAULT_TEXT.to_string(),
            has_logo: false,
            logo_url: String::new(),
            navbar_bg: "#ffffff".to_string(),
            navbar_text: "#111827".to_string(),
            nav_items,
            footer_text: String::new(),
            company_email: String::new(),
            company_phone: String::new(),
            company_address: String::new(),
            social_facebook: String::new(),
            social_linkedin: String::new(),
            social_twitter: String::new(),
            theme,
        },
    }
}

#[derive(Clone, Debug)]
struct HeroView {
    title: String,
    subtitle: String,
    primary_cta: String,
    secondary_cta: String,
    stats: Vec<StatView>,
}

#[derive(Clone, Debug)]
struct StatView {
    value: i64,
    label: String,
}

#[derive(Clone, Debug)]
struct SlideView {
    image_url: String,
    caption: String,
    has_caption: bool,
    active: bool,
}

#[derive(Clone, Debug)]
struct TestimonialView {
    client_name: String,
    company: String,
    has_company: bool,
    message: String,
    stars: String,
}

#[derive(Clone, Debug)]
struct PartnerView {
    name: String,
    logo_url: String,
    has_logo: bool,
    website_url: String,
    has_website: bool,
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    layout: Layout,
    preloader: Option<PreloaderView>,
    hero: Option<HeroView>,
    slides: Vec<SlideView>,
    slide_count: usize,
    steps: Vec<OrderedStep>,
    why_items: Vec<OrderedStep>,
    testimonials: Vec<TestimonialView>,
    partners: Vec<PartnerView>,
}

#[derive(Template)]
#[template(path = "services.html")]
struct ServicesTemplate {
    layout: Layout,
    services: Vec<ServiceCard>,
}

#[derive(Clone, Debug)]
struct ServiceCard {
    id: i64,
    title: String,
    summary: String,
}

#[derive(Template)]
#[template(path = "service_detail.html")]
struct ServiceDetailTemplate {
    layout: Layout,
    title: String,
    summary: String,
    description: String,
}

#[derive(Template)]
#[template(path = "projects.html")]
struct ProjectsTemplate {
    layout: Layout,
    projects: Vec<ProjectCard>,
}

#[derive(Clone, Debug)]
struct ProjectCard {
    slug: String,
    title: String,
    summary: String,
    tags: Vec<String>,
}

#[derive(Template)]
#[template(path = "project_detail.html")]
struct ProjectDetailTemplate {
    layout: Layout,
    title: String,
    summary: String,
    content: String,
    tags: Vec<String>,
    live_url: String,
    has_live_url: bool,
    repo_url: String,
    has_repo_url: bool,
}

#[derive(Template)]
#[template(path = "testimonials.html")]
struct TestimonialsTemplate {
    layout: Layout,
    testimonials: Vec<TestimonialView>,
}

#[derive(Template)]
#[template(path = "team.html")]
struct TeamTemplate {
    layout: Layout,
    categories: Vec<CategoryTab>,
    members: Vec<TeamMemberView>,
}

#[derive(Clone, Debug)]
struct CategoryTab {
    name: String,
    selected: bool,
}

#[derive(Clone, Debug)]
struct TeamMemberView {
    name: String,
    designation: String,
    initials: String,
    image_url: String,
    has_image: bool,
    bio: String,
    linkedin: String,
    has_linkedin: bool,
    twitter: String,
    has_twitter: bool,
}

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactTemplate {
    layout: Layout,
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate {
    layout: Layout,
    title: String,
    content: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    layout: Layout,
    message: String,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    layout: Layout,
    email: String,
    error: String,
    has_error: bool,
}

#[derive(Deserialize)]
struct LoginForm {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct TeamFilter {
    category: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(home)))
        .service(web::resource("/services").route(web::get().to(services)))
        .service(web::resource("/services/{id}").route(web::get().to(service_detail)))
        .service(web::resource("/projects").route(web::get().to(projects)))
        .service(web::resource("/projects/{slug}").route(web::get().to(project_detail)))
        .service(web::resource("/testimonials").route(web::get().to(testimonials)))
        .service(web::resource("/our-management").route(web::get().to(team)))
        .service(web::resource("/contact").route(web::get().to(contact)))
        .service(web::resource("/page/{slug}").route(web::get().to(custom_page)))
        .service(
            web::resource("/login")
                .route(web::get().to(show_login))
                .route(web::post().to(submit_login)),
        )
        .service(web::resource("/health").route(web::get().to(health)));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

async fn home(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let (hero, slides, steps, why_items, testimonials, partners) = tokio::join!(
        state.cached(CacheKey::Hero, state.api.fetch_hero()),
        state.cached_list(CacheKey::HeroSlides, state.api.fetch_hero_slides()),
        state.cached_list(CacheKey::ProcessSteps, state.api.fetch_process_steps()),
        state.cached_list(CacheKey::WhyChooseUs, state.api.fetch_why_choose_us()),
        state.cached_list(CacheKey::Testimonials, state.api.fetch_testimonials()),
        state.cached_list(CacheKey::Partners, state.api.fetch_partners()),
    );
    let layout = layout(&state).await;

    let mut slides: Vec<_> = slides.into_iter().filter(|slide| slide.is_active).collect();
    slides.sort_by_key(|slide| slide.order);
    state
        .carousel
        .sync_slides(&slides.iter().map(|slide| slide.id).collect::<Vec<_>>())
        .await;
    let current = state.carousel.current().await.index;

    let slide_count = slides.len();
    let slides = slides
        .into_iter()
        .enumerate()
        .map(|(i, slide)| SlideView {
            image_url: slide.image_url,
            has_caption: slide.caption.as_deref().is_some_and(|c| !c.is_empty()),
            caption: slide.caption.unwrap_or_default(),
            active: i == current,
        })
        .collect();

    let hero = hero.map(|hero| HeroView {
        title: hero.title.clone(),
        subtitle: hero.subtitle.clone(),
        primary_cta: hero.primary_cta.clone(),
        secondary_cta: hero.secondary_cta.clone(),
        stats: vec![
            StatView {
                value: hero.stat1_value,
                label: hero.stat1_label.clone(),
            },
            StatView {
                value: hero.stat2_value,
                label: hero.stat2_label.clone(),
            },
            StatView {
                value: hero.stat3_value,
                label: hero.stat3_label.clone(),
            },
        ],
    });

    let mut steps = steps;
    steps.sort_by_key(|step| step.order);
    let mut why_items = why_items;
    why_items.sort_by_key(|item| item.order);

    let mut partners: Vec<_> = partners.into_iter().filter(|p| p.is_active).collect();
    partners.sort_by_key(|partner| partner.order);

    let settings = state
        .cache
        .get::<SiteSettings>(CacheKey::SiteSettings)
        .await;
    let preloader = preloader::gate(
        settings.as_deref(),
        req.path(),
        preloader::has_seen(&req),
    );
    let mark_seen = preloader.is_some();

    let page = HomeTemplate {
        layout,
        preloader,
        hero,
        slides,
        slide_count,
        steps,
        why_items,
        testimonials: testimonials.iter().take(3).map(testimonial_view).collect(),
        partners: partners.into_iter().map(partner_view).collect(),
    };

    let mut response = render(page);
    if mark_seen {
        let _ = response.add_cookie(&preloader::seen_cookie(&req));
    }
    Ok(response)
}

async fn services(state: web::Data<AppState>) -> Result<HttpResponse> {
    let services = state
        .cached_list(CacheKey::Services, state.api.fetch_services())
        .await;
    let layout = layout(&state).await;

    let services = services
        .into_iter()
        .map(|service| ServiceCard {
            id: service.id,
            title: service.title,
            summary: service.summary,
        })
        .collect();

    Ok(render(ServicesTemplate { layout, services }))
}

async fn service_detail(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let services = state
        .cached_list(CacheKey::Services, state.api.fetch_services())
        .await;
    let layout = layout(&state).await;

    match services.into_iter().find(|service| service.id == id) {
        Some(service) => Ok(render(ServiceDetailTemplate {
            layout,
            title: service.title,
            summary: service.summary,
            description: service.description,
        })),
        None => Ok(render_not_found(NotFoundTemplate {
            layout,
            message: "We couldn't find that service.".to_string(),
        })),
    }
}

async fn projects(state: web::Data<AppState>) -> Result<HttpResponse> {
    let projects = state
        .cached_list(CacheKey::Projects, state.api.fetch_projects())
        .await;
    let layout = layout(&state).await;

    let projects = projects
        .iter()
        .map(|project| ProjectCard {
            slug: project.slug.clone(),
            title: project.title.clone(),
            summary: project.summary.clone(),
            tags: project.tag_list(),
        })
        .collect();

    Ok(render(ProjectsTemplate { layout, projects }))
}

async fn project_detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();
    let layout = layout(&state).await;

    match state.api.fetch_project_by_slug(&slug).await {
        Ok(project) => {
            let tags = project.tag_list();
            Ok(render(ProjectDetailTemplate {
                layout,
                title: project.title,
                summary: project.summary,
                content: project.content.unwrap_or_default(),
                tags,
                has_live_url: project.live_url.as_deref().is_some_and(|u| !u.is_empty()),
                live_url: project.live_url.unwrap_or_default(),
                has_repo_url: project.repo_url.as_deref().is_some_and(|u| !u.is_empty()),
                repo_url: project.repo_url.unwrap_or_default(),
            }))
        }
        Err(err) => {
            log::warn!("project lookup failed: {err}");
            Ok(render_not_found(NotFoundTemplate {
                layout,
                message: "We couldn't find that project.".to_string(),
            }))
        }
    }
}

async fn testimonials(state: web::Data<AppState>) -> Result<HttpResponse> {
    let testimonials = state
        .cached_list(CacheKey::Testimonials, state.api.fetch_testimonials())
        .await;
    let layout = layout(&state).await;

    Ok(render(TestimonialsTemplate {
        layout,
        testimonials: testimonials.iter().map(testimonial_view).collect(),
    }))
}

async fn team(
    state: web::Data<AppState>,
    query: web::Query<TeamFilter>,
) -> Result<HttpResponse> {
    let selected = query
        .category
        .as_deref()
        .filter(|category| !category.is_empty());

    let categories = state
        .cached_list(CacheKey::TeamCategories, state.api.fetch_team_categories())
        .await;
    let members = match selected {
        Some(category) => state
            .api
            .fetch_team_by_category(category)
            .await
            .unwrap_or_default(),
        None => state.cached_list(CacheKey::Team, state.api.fetch_team()).await,
    };
    let layout = layout(&state).await;

    let mut members = members;
    members.sort_by_key(|member| member.display_order);

    let categories = categories
        .into_iter()
        .map(|name| CategoryTab {
            selected: selected == Some(name.as_str()),
            name,
        })
        .collect();

    let members = members
        .into_iter()
        .map(|member| {
            let initials = member
                .name
                .split_whitespace()
                .filter_map(|part| part.chars().next())
                .take(2)
                .collect::<String>()
                .to_uppercase();
            TeamMemberView {
                initials,
                has_image: member.image_url.as_deref().is_some_and(|u| !u.is_empty()),
                image_url: member.image_url.unwrap_or_default(),
                bio: member.bio.unwrap_or_default(),
                has_linkedin: member.linkedin.as_deref().is_some_and(|u| !u.is_empty()),
                linkedin: member.linkedin.unwrap_or_default(),
                has_twitter: member.twitter.as_deref().is_some_and(|u| !u.is_empty()),
                twitter: member.twitter.unwrap_or_default(),
                name: member.name,
                designation: member.designation,
            }
        })
        .collect();

    Ok(render(TeamTemplate {
        layout,
        categories,
        members,
    }))
}

async fn contact(state: web::Data<AppState>) -> Result<HttpResponse> {
    let layout = layout(&state).await;
    Ok(render(ContactTemplate { layout }))
}

async fn custom_page(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();
    let layout = layout(&state).await;

    match state.api.fetch_page_by_slug(&slug).await {
        Ok(page) => Ok(render(PageTemplate {
            layout,
            title: page.title,
            content: page.content,
        })),
        Err(err) => {
            log::warn!("page lookup failed: {err}");
            Ok(render_not_found(NotFoundTemplate {
                layout,
                message: "This page doesn't exist.".to_string(),
            }))
        }
    }
}

async fn show_login(state: web::Data<AppState>) -> Result<HttpResponse> {
    let layout = layout(&state).await;
    Ok(render(LoginTemplate {
        layout,
        email: String::new(),
        error: String::new(),
        has_error: false,
    }))
}

async fn submit_login(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();

    match state.session.login(form.email.trim(), &form.password).await {
        Ok((token, user)) => {
            log::info!("{} signed in", user.email);
            // Greets the admin on the dashboard they land on.
            state
                .banner
                .success("dashboard", "Authenticated ✓", status::LOGIN_CLEAR)
                .await;
            Ok(HttpResponse::SeeOther()
                .append_header((header::LOCATION, "/admin/dashboard"))
                .cookie(session::token_cookie(&req, &token))
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .finish())
        }
        Err(err) => {
            log::warn!("login rejected: {err}");
            let layout = layout(&state).await;
            Ok(render(LoginTemplate {
                layout,
                email: form.email,
                error: "Login failed".to_string(),
                has_error: true,
            }))
        }
    }
}

fn testimonial_view(testimonial: &crate::models::Testimonial) -> TestimonialView {
    let rating = testimonial.rating.clamp(0, 5) as usize;
    TestimonialView {
        client_name: testimonial.client_name.clone(),
        has_company: testimonial.company.as_deref().is_some_and(|c| !c.is_empty()),
        company: testimonial.company.clone().unwrap_or_default(),
        message: testimonial.message.clone(),
        stars: "★".repeat(rating) + &"☆".repeat(5 - rating),
    }
}

fn partner_view(partner: crate::models::Partner) -> PartnerView {
    PartnerView {
        name: partner.name,
        has_logo: partner.logo_url.as_deref().is_some_and(|u| !u.is_empty()),
        logo_url: partner.logo_url.unwrap_or_default(),
        has_website: partner.website_url.as_deref().is_some_and(|u| !u.is_empty()),
        website_url: partner.website_url.unwrap_or_default(),
    }
}
