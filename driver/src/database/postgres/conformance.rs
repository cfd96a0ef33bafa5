//! Store contract checks shared by every [`PersistenceStrategy`].

use kernel::interface::database::DatabaseConnection;
use kernel::interface::store::{BookStore, DependOnBookStore, DependOnOwnerStore, OwnerStore};
use kernel::prelude::entity::{
    Book, BookAuthor, BookDraft, BookId, BookPageCount, BookTitle, Owner, OwnerAge, OwnerDraft,
    OwnerFullName, OwnerId, OwnerTitle,
};
use kernel::KernelError;

use crate::database::postgres::{PersistenceStrategy, PostgresDatabase};

type TestResult = error_stack::Result<(), KernelError>;

async fn database(
    strategy: PersistenceStrategy,
) -> error_stack::Result<PostgresDatabase, KernelError> {
    let db = PostgresDatabase::with_strategy(strategy).await?;
    db.migrate().await?;
    Ok(db)
}

fn reader() -> OwnerDraft {
    OwnerDraft::new(
        OwnerTitle::new("reader"),
        OwnerFullName::new(format!("Test Test {}", rand::random::<u32>())),
        OwnerAge::new(111),
    )
}

fn draft(id: Option<BookId>, owner_id: OwnerId, title: Option<&str>, pages: i64) -> BookDraft {
    BookDraft::new(
        id,
        owner_id,
        title.map(BookTitle::new),
        title.map(|_| BookAuthor::new("Test Author")),
        BookPageCount::new(pages),
    )
}

fn empty(id: Option<BookId>, owner_id: OwnerId) -> BookDraft {
    BookDraft::new(id, owner_id, None, None, BookPageCount::new(0))
}

fn missing_owner() -> OwnerId {
    OwnerId::new(-i64::from(rand::random::<u32>()) - 1)
}

async fn owner_round_trip(strategy: PersistenceStrategy) -> TestResult {
    let db = database(strategy).await?;
    let mut con = db.acquire().await?;
    let owners = db.owner_store();

    let draft = reader();
    let created = owners.create(&mut con, &draft).await?;
    assert_eq!(created, draft.clone().into_owner(*created.id()));

    let found = owners.find_by_id(&mut con, created.id()).await?;
    assert_eq!(found, created);
    assert_eq!(found.title(), &OwnerTitle::new("reader"));
    assert_eq!(found.age(), &OwnerAge::new(111));

    let changed = created.clone().reconstruct(|o| {
        o.full_name = OwnerFullName::new("Changed Name");
        o.age = OwnerAge::new(42);
    });
    let updated = owners.update(&mut con, &changed).await?;
    assert_eq!(updated, changed);
    assert_eq!(owners.find_by_id(&mut con, created.id()).await?, changed);

    owners.delete_by_id(&mut con, created.id()).await?;
    let error = owners.find_by_id(&mut con, created.id()).await.unwrap_err();
    assert_eq!(error.current_context(), &KernelError::NotFound);
    Ok(())
}

async fn owner_missing(strategy: PersistenceStrategy) -> TestResult {
    let db = database(strategy).await?;
    let mut con = db.acquire().await?;
    let owners = db.owner_store();
    let id = missing_owner();

    let ghost = reader().into_owner(id);
    let error = owners.update(&mut con, &ghost).await.unwrap_err();
    assert_eq!(error.current_context(), &KernelError::NotFound);

    let error = owners.find_by_id(&mut con, &id).await.unwrap_err();
    assert_eq!(error.current_context(), &KernelError::NotFound);

    let error = owners.delete_by_id(&mut con, &id).await.unwrap_err();
    assert_eq!(error.current_context(), &KernelError::NotFound);
    Ok(())
}

async fn owner_delete_cascades(strategy: PersistenceStrategy) -> TestResult {
    let db = database(strategy).await?;
    let mut con = db.acquire().await?;
    let owners = db.owner_store();
    let books = db.book_store();
    let owner = owners.create(&mut con, &reader()).await?;
    let other = owners.create(&mut con, &reader()).await?;

    for (title, pages) in [("first", 5500), ("second", 6655)] {
        books
            .create(&mut con, &draft(None, *owner.id(), Some(title), pages))
            .await?;
    }
    let kept = books
        .create(&mut con, &draft(None, *other.id(), Some("kept"), 1))
        .await?;
    assert_eq!(books.find_by_owner_id(&mut con, owner.id()).await?.len(), 2);

    owners.delete_by_id(&mut con, owner.id()).await?;
    assert!(books.find_by_owner_id(&mut con, owner.id()).await?.is_empty());
    assert_eq!(
        books.find_by_owner_id(&mut con, other.id()).await?,
        kept.into_iter().collect::<Vec<_>>()
    );
    Ok(())
}

async fn book_create(strategy: PersistenceStrategy) -> TestResult {
    let db = database(strategy).await?;
    let mut con = db.acquire().await?;
    let owner = db.owner_store().create(&mut con, &reader()).await?;
    let books = db.book_store();

    let created = books
        .create(&mut con, &draft(None, *owner.id(), Some("test"), 1000))
        .await?
        .expect("non-empty book is created");
    assert_eq!(created.owner_id(), owner.id());
    assert_eq!(created.title(), &Some(BookTitle::new("test")));
    assert_eq!(created.page_count(), &BookPageCount::new(1000));

    let ignored = books.create(&mut con, &empty(None, *owner.id())).await?;
    assert!(ignored.is_none());

    let listed = books.find_by_owner_id(&mut con, owner.id()).await?;
    assert_eq!(listed, vec![created]);

    let error = books
        .create(&mut con, &draft(None, missing_owner(), Some("orphan"), 1))
        .await
        .unwrap_err();
    assert_eq!(error.current_context(), &KernelError::NotFound);
    Ok(())
}

async fn book_upsert(strategy: PersistenceStrategy) -> TestResult {
    let db = database(strategy).await?;
    let mut con = db.acquire().await?;
    let owner = db.owner_store().create(&mut con, &reader()).await?;
    let other = db.owner_store().create(&mut con, &reader()).await?;
    let books = db.book_store();

    // Without an id a non-empty draft is created and an empty one is ignored.
    let created = books
        .update(&mut con, &draft(None, *owner.id(), Some("first"), 5500))
        .await?
        .expect("non-empty draft without id is created");
    assert!(books
        .update(&mut con, &empty(None, *owner.id()))
        .await?
        .is_none());

    // Overwrite every field of an existing row.
    let overwrite = BookDraft::new(
        Some(*created.id()),
        *owner.id(),
        None,
        Some(BookAuthor::new("Someone Else")),
        BookPageCount::new(6655),
    );
    let updated = books
        .update(&mut con, &overwrite)
        .await?
        .expect("existing row is overwritten");
    assert_eq!(updated, overwrite.clone().into_book(*created.id()));

    // Rows of another owner are left alone.
    let foreign = draft(Some(*created.id()), *other.id(), Some("stolen"), 1);
    assert!(books.update(&mut con, &foreign).await?.is_none());
    assert!(books
        .update(&mut con, &empty(Some(*created.id()), *other.id()))
        .await?
        .is_none());
    assert_eq!(
        books.find_by_owner_id(&mut con, owner.id()).await?,
        vec![updated.clone()]
    );

    // Unknown ids write nothing.
    let unknown = BookId::new(i64::MAX - i64::from(rand::random::<u32>()));
    assert!(books
        .update(&mut con, &draft(Some(unknown), *owner.id(), Some("ghost"), 1))
        .await?
        .is_none());
    assert!(books
        .update(&mut con, &empty(Some(unknown), *owner.id()))
        .await?
        .is_none());
    assert_eq!(
        books.find_by_owner_id(&mut con, owner.id()).await?,
        vec![updated]
    );

    // An empty draft aimed at an existing row deletes it.
    assert!(books
        .update(&mut con, &empty(Some(*created.id()), *owner.id()))
        .await?
        .is_none());
    assert!(books.find_by_owner_id(&mut con, owner.id()).await?.is_empty());

    let error = books
        .update(&mut con, &empty(Some(*created.id()), missing_owner()))
        .await
        .unwrap_err();
    assert_eq!(error.current_context(), &KernelError::NotFound);
    Ok(())
}

async fn book_delete_by_owner(strategy: PersistenceStrategy) -> TestResult {
    let db = database(strategy).await?;
    let mut con = db.acquire().await?;
    let owner = db.owner_store().create(&mut con, &reader()).await?;
    let other = db.owner_store().create(&mut con, &reader()).await?;
    let books = db.book_store();

    let mut created = Vec::new();
    for pages in [1, 2, 3] {
        let book = books
            .create(&mut con, &draft(None, *owner.id(), Some("series"), pages))
            .await?;
        created.extend(book);
    }
    let kept = books
        .create(&mut con, &draft(None, *other.id(), Some("kept"), 9))
        .await?;

    let listed = books.find_by_owner_id(&mut con, owner.id()).await?;
    assert_eq!(listed, created);
    assert!(listed.windows(2).all(|w| w[0].id().as_ref() < w[1].id().as_ref()));

    books.delete_by_owner_id(&mut con, owner.id()).await?;
    assert!(books.find_by_owner_id(&mut con, owner.id()).await?.is_empty());
    assert_eq!(
        books.find_by_owner_id(&mut con, other.id()).await?,
        kept.into_iter().collect::<Vec<_>>()
    );

    // Nothing left to delete is not an error.
    books.delete_by_owner_id(&mut con, owner.id()).await?;
    Ok(())
}

/// A book outcome with store-assigned ids replaced by their position.
#[derive(Debug, PartialEq)]
enum Outcome {
    Nothing,
    Book {
        title: Option<String>,
        author: Option<String>,
        pages: i64,
    },
    Listed(usize),
    Failed(KernelError),
}

impl From<&Book> for Outcome {
    fn from(book: &Book) -> Self {
        Outcome::Book {
            title: book.title().clone().map(Into::into),
            author: book.author().clone().map(Into::into),
            pages: *book.page_count().as_ref(),
        }
    }
}

fn outcome(result: error_stack::Result<Option<Book>, KernelError>) -> Outcome {
    match result {
        Ok(Some(book)) => Outcome::from(&book),
        Ok(None) => Outcome::Nothing,
        Err(error) => Outcome::Failed(*error.current_context()),
    }
}

async fn script(
    strategy: PersistenceStrategy,
) -> error_stack::Result<Vec<Outcome>, KernelError> {
    let db = database(strategy).await?;
    let mut con = db.acquire().await?;
    let owner: Owner = db.owner_store().create(&mut con, &reader()).await?;
    let books = db.book_store();
    let owner_id = *owner.id();
    let mut outcomes = Vec::new();

    let first = books
        .create(&mut con, &draft(None, owner_id, Some("first"), 5500))
        .await?
        .expect("first book is created");
    outcomes.push(Outcome::from(&first));
    let steps = [
        empty(None, owner_id),
        draft(None, owner_id, Some("second"), 6655),
        draft(Some(*first.id()), owner_id, Some("renamed"), 10),
        draft(Some(*first.id()), missing_owner(), Some("orphan"), 10),
        empty(Some(BookId::new(i64::MAX)), owner_id),
        empty(Some(*first.id()), owner_id),
        draft(Some(*first.id()), owner_id, Some("resurrect"), 10),
    ];
    for step in steps {
        outcomes.push(outcome(books.update(&mut con, &step).await));
    }
    let listed = books.find_by_owner_id(&mut con, &owner_id).await?;
    outcomes.push(Outcome::Listed(listed.len()));
    outcomes.extend(listed.iter().map(Outcome::from));
    Ok(outcomes)
}

async fn strategies_agree() -> TestResult {
    let mapped = script(PersistenceStrategy::Mapped).await?;
    let statement = script(PersistenceStrategy::Statement).await?;
    assert_eq!(mapped, statement);
    assert_eq!(
        mapped[4],
        Outcome::Failed(KernelError::NotFound),
        "unknown owner is reported before the row lookup"
    );
    Ok(())
}

macro_rules! conformance {
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
                async fn owner_missing() -> TestResult {
                    super::owner_missing($strategy).await
                }

                #[test_with::env(POSTGRES_TEST)]
                #[tokio::test]
                async fn owner_delete_cascades() -> TestResult {
                    super::owner_delete_cascades($strategy).await
                }

                #[test_with::env(POSTGRES_TEST)]
                #[tokio::test]
                async fn book_create() -> TestResult {
                    super::book_create($strategy).await
                }

                #[test_with::env(POSTGRES_TEST)]
                #[tokio::test]
                async fn book_upsert() -> TestResult {
                    super::book_upsert($strategy).await
                }

                #[test_with::env(POSTGRES_TEST)]
                #[tokio::test]
                async fn book_delete_by_owner() -> TestResult {
                    super::book_delete_by_owner($strategy).await
                }
            }
        )*
    };
}

conformance! {
    mapped => PersistenceStrategy::Mapped,
    statement => PersistenceStrategy::Statement,
}

#[test_with::env(POSTGRES_TEST)]
#[tokio::test]
async fn mapped_and_statement_agree() -> TestResult {
    strategies_agree().await
}
