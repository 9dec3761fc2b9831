//! In-memory repositories for tests.
//!
//! [`InMemoryStore`] implements every repository trait over plain vectors and
//! mirrors the database constraints the services rely on: unique emails,
//! category foreign keys, positive amounts and the owner scope on expense
//! listings.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use expense_tracker_config::{CorsConfig, JwtConfig};
use expense_tracker_models::{
    Category, Expense, ExpenseFilter, ExpenseSortField, NewExpense, NewUser, SortOrder,
    UpdateExpenseDto, User, UserWithPassword,
};

use crate::modules::auth::UserRepository;
use crate::modules::categories::CategoryRepository;
use crate::modules::expenses::ExpenseRepository;
use crate::repository::{RepoError, RepoResult};
use crate::state::AppState;

pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Food & Dining",
    "Transportation",
    "Housing",
    "Utilities",
    "Healthcare",
    "Entertainment",
    "Shopping",
    "Education",
    "Travel",
    "Others",
];

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserWithPassword>,
    categories: Vec<Category>,
    expenses: Vec<Expense>,
    next_user_id: i64,
    next_category_id: i64,
    next_expense_id: i64,
}

impl Tables {
    fn category_name(&self, id: i64) -> Option<String> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
    }
}

#[derive(Debug)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// A store seeded with the default categories, ids 1 to 10.
    pub fn new() -> Self {
        let now = Utc::now();
        let mut tables = Tables::default();
        for name in DEFAULT_CATEGORIES {
            tables.next_category_id += 1;
            tables.categories.push(Category {
                id: tables.next_category_id,
                name: name.to_string(),
                created_at: now,
                updated_at: now,
            });
        }

        Self {
            tables: Mutex::new(tables),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts a user that cannot log in and returns its id.
    pub fn insert_user(&self, email: &str) -> i64 {
        let mut tables = self.lock();
        let now = Utc::now();
        tables.next_user_id += 1;
        let id = tables.next_user_id;
        tables.users.push(UserWithPassword {
            id,
            name: "Test User".to_string(),
            email: email.to_string(),
            email_verified_at: None,
            password: String::new(),
            created_at: now,
            updated_at: now,
        });
        id
    }

    /// Inserts an expense directly, skipping constraint checks.
    pub fn insert_expense(&self, expense: NewExpense) -> Expense {
        let mut tables = self.lock();
        let now = Utc::now();
        tables.next_expense_id += 1;
        let row = Expense {
            id: tables.next_expense_id,
            user_id: expense.user_id,
            category_id: expense.category_id,
            amount: expense.amount,
            description: expense.description,
            expense_date: expense.expense_date,
            category_name: tables
                .category_name(expense.category_id)
                .unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        tables.expenses.push(row.clone());
        row
    }

    pub fn expense_count(&self) -> usize {
        self.lock().expenses.len()
    }

    /// An [`AppState`] whose repositories all point at this store.
    pub fn into_app_state(self: Arc<Self>, jwt_config: JwtConfig) -> AppState {
        AppState {
            users: self.clone(),
            categories: self.clone(),
            expenses: self,
            jwt_config,
            cors_config: CorsConfig {
                allowed_origins: vec!["http://localhost:5173".to_string()],
            },
        }
    }
}

/// A valid expense for `user_id` dated 2025-01-15.
pub fn sample_expense(user_id: i64, category_id: i64) -> NewExpense {
    NewExpense {
        user_id,
        category_id,
        amount: Decimal::new(2_550, 2),
        description: "Groceries".to_string(),
        expense_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default(),
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserWithPassword>> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> RepoResult<User> {
        let mut tables = self.lock();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Conflict);
        }

        let now = Utc::now();
        tables.next_user_id += 1;
        let row = UserWithPassword {
            id: tables.next_user_id,
            name: user.name,
            email: user.email,
            email_verified_at: None,
            password: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(row.clone());
        Ok(row.into_user())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list(&self) -> RepoResult<Vec<Category>> {
        let mut categories = self.lock().categories.clone();
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }

    async fn find(&self, id: i64) -> RepoResult<Option<Category>> {
        Ok(self.lock().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, name: &str) -> RepoResult<Category> {
        let mut tables = self.lock();
        let now = Utc::now();
        tables.next_category_id += 1;
        let category = Category {
            id: tables.next_category_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut tables = self.lock();
        if tables.expenses.iter().any(|e| e.category_id == id) {
            return Err(RepoError::ForeignKey);
        }

        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        Ok(tables.categories.len() < before)
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryStore {
    async fn list(&self, filter: &ExpenseFilter) -> RepoResult<Vec<Expense>> {
        let user_id = filter.user_id.ok_or(RepoError::MissingOwnerScope)?;
        let search = filter.search.as_ref().map(|s| s.to_lowercase());

        let mut expenses: Vec<Expense> = self
            .lock()
            .expenses
            .iter()
            .filter(|e| e.user_id == user_id)
            .filter(|e| filter.category_id.is_none_or(|id| e.category_id == id))
            .filter(|e| {
                search
                    .as_ref()
                    .is_none_or(|term| e.description.to_lowercase().contains(term))
            })
            .cloned()
            .collect();

        expenses.sort_by(|a, b| {
            let ordering = match filter.sort_by {
                ExpenseSortField::Date => a.expense_date.cmp(&b.expense_date),
                ExpenseSortField::Amount => a.amount.cmp(&b.amount),
            }
            .then(a.id.cmp(&b.id));

            match filter.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        Ok(expenses)
    }

    async fn find(&self, id: i64) -> RepoResult<Option<Expense>> {
        Ok(self.lock().expenses.iter().find(|e| e.id == id).cloned())
    }

    async fn verify_ownership(&self, id: i64, user_id: i64) -> RepoResult<bool> {
        Ok(self
            .lock()
            .expenses
            .iter()
            .any(|e| e.id == id && e.user_id == user_id))
    }

    async fn create(&self, expense: NewExpense) -> RepoResult<Expense> {
        {
            let tables = self.lock();
            if tables.category_name(expense.category_id).is_none()
                || !tables.users.iter().any(|u| u.id == expense.user_id)
            {
                return Err(RepoError::ForeignKey);
            }
        }
        if expense.amount <= Decimal::ZERO {
            return Err(RepoError::CheckViolation);
        }

        Ok(self.insert_expense(expense))
    }

    async fn update(&self, id: i64, changes: &UpdateExpenseDto) -> RepoResult<Option<Expense>> {
        if changes.amount.is_some_and(|amount| amount <= Decimal::ZERO) {
            return Err(RepoError::CheckViolation);
        }

        let mut tables = self.lock();

        let category_name = match changes.category_id {
            Some(category_id) => Some(
                tables
                    .category_name(category_id)
                    .ok_or(RepoError::ForeignKey)?,
            ),
            None => None,
        };

        let Some(expense) = tables.expenses.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };

        if let (Some(category_id), Some(name)) = (changes.category_id, category_name) {
            expense.category_id = category_id;
            expense.category_name = name;
        }
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(description) = &changes.description {
            expense.description = description.clone();
        }
        if let Some(expense_date) = changes.expense_date {
            expense.expense_date = expense_date;
        }
        expense.updated_at = Utc::now();

        Ok(Some(expense.clone()))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut tables = self.lock();
        let before = tables.expenses.len();
        tables.expenses.retain(|e| e.id != id);
        Ok(tables.expenses.len() < before)
    }
}
