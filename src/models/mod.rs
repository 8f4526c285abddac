pub(crate) mod amount;
mod category;
mod expense;
mod month;

pub(crate) use category::find_by_name;
pub(crate) use expense::Expense;
pub(crate) use month::MonthKey;

#[cfg(test)]
mod tests;
