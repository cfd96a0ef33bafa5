//! Orchestrator scenarios against a live PostgreSQL, run once per strategy.

use driver::database::{PersistenceStrategy, PostgresDatabase};
use kernel::KernelError;

use crate::service::{
    CreateOwnerWithBooksService, DeleteOwnerWithBooksService, GetOwnerWithBooksService,
    UpdateOwnerWithBooksService,
};
use crate::transfer::{
    BookDto, CreateBookDto, CreateOwnerDto, CreateOwnerWithBooksDto, DeleteOwnerWithBooksDto,
    GetOwnerWithBooksDto, OwnerWithBooksDto, UpdateBookDto, UpdateOwnerDto,
    UpdateOwnerWithBooksDto,
};

type TestResult = error_stack::Result<(), KernelError>;

async fn database(
    strategy: PersistenceStrategy,
) -> error_stack::Result<PostgresDatabase, KernelError> {
    let db = PostgresDatabase::with_strategy(strategy).await?;
    db.migrate().await?;
    Ok(db)
}

fn reader() -> CreateOwnerDto {
    CreateOwnerDto {
        title: "reader".to_string(),
        full_name: "Test Test".to_string(),
        age: 111,
    }
}

fn book(title: &str, page_count: i64) -> CreateBookDto {
    CreateBookDto {
        title: Some(title.to_string()),
        author: Some(format!("Author {}", rand::random::<u16>())),
        page_count,
    }
}

fn get(id: i64) -> GetOwnerWithBooksDto {
    GetOwnerWithBooksDto { id: Some(id) }
}

fn upsert(view: &OwnerWithBooksDto, books: Vec<UpdateBookDto>) -> UpdateOwnerWithBooksDto {
    UpdateOwnerWithBooksDto {
        owner: Some(UpdateOwnerDto {
            id: Some(view.owner.id),
            title: view.owner.title.clone(),
            full_name: view.owner.full_name.clone(),
            age: view.owner.age,
        }),
        books: books.into_iter().map(Some).collect(),
    }
}

fn tombstone(book: &BookDto) -> UpdateBookDto {
    UpdateBookDto {
        id: Some(book.id),
        title: None,
        author: None,
        page_count: 0,
    }
}

async fn owner_round_trip(strategy: PersistenceStrategy) -> TestResult {
    let db = database(strategy).await?;
    let created = db
        .create_owner_with_books(CreateOwnerWithBooksDto {
            owner: Some(reader()),
            books: vec![],
        })
        .await?;
    assert!(created.books.is_empty());

    let found = db.get_owner_with_books(get(created.owner.id)).await?;
    assert_eq!(found.owner.title, "reader");
    assert_eq!(found.owner.full_name, "Test Test");
    assert_eq!(found.owner.age, 111);
    assert_eq!(found, created);
    Ok(())
}

async fn owner_with_two_books(strategy: PersistenceStrategy) -> TestResult {
    let db = database(strategy).await?;
    let created = db
        .create_owner_with_books(CreateOwnerWithBooksDto {
            owner: Some(reader()),
            books: vec![Some(book("first", 5500)), None, Some(book("second", 6655))],
        })
        .await?;
    let id = created.owner.id;

    let found = db.get_owner_with_books(get(id)).await?;
    let pages = found.books.iter().map(|b| b.page_count).collect::<Vec<_>>();
    assert_eq!(pages, vec![5500, 6655]);
    assert!(found.books.iter().all(|b| b.owner_id == id));
    assert_eq!(found, created);
    assert_eq!(db.get_owner_with_books(get(id)).await?, found);

    db.delete_owner_with_books(DeleteOwnerWithBooksDto { id: Some(id) })
        .await?;
    let error = db.get_owner_with_books(get(id)).await.unwrap_err();
    assert_eq!(error.current_context(), &KernelError::NotFound);
    Ok(())
}

async fn upsert_reconciles_books(strategy: PersistenceStrategy) -> TestResult {
    let db = database(strategy).await?;
    let created = db
        .create_owner_with_books(CreateOwnerWithBooksDto {
            owner: Some(reader()),
            books: vec![Some(book("first", 5500)), Some(book("second", 6655))],
        })
        .await?;
    let first = &created.books[0];
    let second = &created.books[1];

    let added = UpdateBookDto {
        id: Some(0),
        title: Some("third".to_string()),
        author: None,
        page_count: 12,
    };
    let renamed = UpdateBookDto {
        id: Some(second.id),
        title: Some("renamed".to_string()),
        author: second.author.clone(),
        page_count: second.page_count,
    };
    let request = upsert(
        &created,
        vec![tombstone(first), renamed, added, tombstone(first)],
    );
    let updated = db.update_owner_with_books(request).await?;
    let titles = updated
        .books
        .iter()
        .map(|b| b.title.as_deref())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec![Some("renamed"), Some("third")]);
    assert_eq!(updated.books[0].id, second.id);

    let found = db.get_owner_with_books(get(created.owner.id)).await?;
    assert_eq!(found.books, updated.books);
    assert!(found.books.iter().all(|b| b.id != first.id));
    Ok(())
}

async fn delete_missing_owner(strategy: PersistenceStrategy) -> TestResult {
    let db = database(strategy).await?;
    let id = -i64::from(rand::random::<u32>()) - 1;
    let error = db
        .delete_owner_with_books(DeleteOwnerWithBooksDto { id: Some(id) })
        .await
        .unwrap_err();
    assert_eq!(error.current_context(), &KernelError::NotFound);

    let created = db
        .create_owner_with_books(CreateOwnerWithBooksDto {
            owner: Some(reader()),
            books: vec![],
        })
        .await?;
    let mut request = upsert(&created, vec![]);
    if let Some(owner) = request.owner.as_mut() {
        owner.id = Some(id);
    }
    let error = db.update_owner_with_books(request).await.unwrap_err();
    assert_eq!(error.current_context(), &KernelError::NotFound);
    Ok(())
}

/// The books of a view without their store-assigned ids.
fn normalize(view: &OwnerWithBooksDto) -> Vec<(Option<String>, Option<String>, i64)> {
    view.books
        .iter()
        .map(|b| (b.title.clone(), b.author.clone(), b.page_count))
        .collect()
}

async fn history(
    strategy: PersistenceStrategy,
) -> error_stack::Result<Vec<Vec<(Option<String>, Option<String>, i64)>>, KernelError> {
    let db = database(strategy).await?;
    let fixed = |title: &str, page_count| CreateBookDto {
        title: Some(title.to_string()),
        author: None,
        page_count,
    };
    let created = db
        .create_owner_with_books(CreateOwnerWithBooksDto {
            owner: Some(reader()),
            books: vec![Some(fixed("first", 5500)), Some(fixed("second", 6655))],
        })
        .await?;
    let request = upsert(
        &created,
        vec![
            tombstone(&created.books[0]),
            UpdateBookDto {
                id: None,
                title: None,
                author: None,
                page_count: 0,
            },
            UpdateBookDto {
                id: Some(created.books[1].id),
                title: None,
                author: Some("Someone".to_string()),
                page_count: 1,
            },
        ],
    );
    let updated = db.update_owner_with_books(request).await?;
    let found = db.get_owner_with_books(get(created.owner.id)).await?;
    Ok(vec![normalize(&created), normalize(&updated), normalize(&found)])
}

macro_rules! scenarios {
    ($($module:ident => $strategy:expr),* $(,)?) => {
        $(
            mod $module {
                use super::*;

                #[test_with::env(POSTGRES_TEST)]
                #[tokio::test]
                async fn owner_round_trip() -> TestResult {
                    super::owner_round_trip($strategy).await
                }

                #[test_with::env(POSTGRES_TEST)]
                #[tokio::test]
                async fn owner_with_two_books() -> TestResult {
                    super::owner_with_two_books($strategy).await
                }

                #[test_with::env(POSTGRES_TEST)]
                #[tokio::test]
                async fn upsert_reconciles_books() -> TestResult {
                    super::upsert_reconciles_books($strategy).await
                }

                #[test_with::env(POSTGRES_TEST)]
                #[tokio::test]
                async fn delete_missing_owner() -> TestResult {
                    super::delete_missing_owner($strategy).await
                }
            }
        )*
    };
}

scenarios! {
    mapped => PersistenceStrategy::Mapped,
    statement => PersistenceStrategy::Statement,
}

#[test_with::env(POSTGRES_TEST)]
#[tokio::test]
async fn strategies_share_history() -> TestResult {
    let mapped = history(PersistenceStrategy::Mapped).await?;
    let statement = history(PersistenceStrategy::Statement).await?;
    assert_eq!(mapped, statement);
    Ok(())
}
