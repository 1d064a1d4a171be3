mod count;
mod health_check;
mod helpers;
mod startup;
