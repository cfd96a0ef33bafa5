use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use application::service::{
    CreateOwnerWithBooksService, DeleteOwnerWithBooksService, GetOwnerWithBooksService,
    UpdateOwnerWithBooksService,
};

use crate::controller::Controller;
use crate::handler::AppModule;
use crate::request::{
    CreateOwnerRequest, DeleteOwnerRequest, GetOwnerRequest, OwnerTransformer, UpdateOwnerRequest,
};
use crate::response::OwnerPresenter;

pub trait OwnerRouter {
    fn route_owner(self) -> Self;
}

impl OwnerRouter for Router<AppModule> {
    fn route_owner(self) -> Self {
        self.route(
            "/owners",
            post(
                |State(module): State<AppModule>, Json(req): Json<CreateOwnerRequest>| async move {
                    Controller::new(OwnerTransformer, OwnerPresenter)
                        .intake(req)
                        .handle(|dto| async move {
                            module.pgpool().create_owner_with_books(dto).await
                        })
                        .await
                        .map(|res| (StatusCode::CREATED, res))
                },
            )
            .put(
                |State(module): State<AppModule>, Json(req): Json<UpdateOwnerRequest>| async move {
                    Controller::new(OwnerTransformer, OwnerPresenter)
                        .intake(req)
                        .handle(|dto| async move {
                            module.pgpool().update_owner_with_books(dto).await
                        })
                        .await
                },
            ),
        )
        .route(
            "/owners/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<i64>| async move {
                    Controller::new(OwnerTransformer, OwnerPresenter)
                        .intake(GetOwnerRequest::new(id))
                        .handle(|dto| async move {
                            module.pgpool().get_owner_with_books(dto).await
                        })
                        .await
                },
            )
            .delete(
                |State(module): State<AppModule>, Path(id): Path<i64>| async move {
                    Controller::new(OwnerTransformer, OwnerPresenter)
                        .intake(DeleteOwnerRequest::new(id))
                        .handle(|dto| async move {
                            module.pgpool().delete_owner_with_books(dto).await
                        })
                        .await
                },
            ),
        )
    }
}
