use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    db::RecipeRepository,
    error::{AppError, AppResult},
    models::{
        meal_plan::default_end_date, AssignRecipeRequest, Assignment, CreateMealPlanRequest,
        MealPlan, MealPlanDetail, MealPlanList, MealPlanSummary, PlanDay, PlannedRecipe,
    },
    services::recipes::recipe_not_found,
};

/// Creates an empty draft plan; a missing end date gives a one-week plan
pub async fn create_meal_plan(
    repository: &dyn RecipeRepository,
    request: CreateMealPlanRequest,
) -> AppResult<MealPlan> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("Name is required".to_string()));
    }

    let end_date = request
        .end_date
        .unwrap_or_else(|| default_end_date(request.start_date));
    if end_date < request.start_date {
        return Err(AppError::InvalidInput(
            "endDate must not be before startDate".to_string(),
        ));
    }

    let created_by = request
        .created_by
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let plan = MealPlan::new(name, request.start_date, end_date, created_by);
    repository.create_meal_plan(&plan).await?;

    tracing::info!(
        meal_plan_id = %plan.id,
        start_date = %plan.start_date,
        end_date = %plan.end_date,
        "Meal plan created"
    );

    Ok(plan)
}

/// Lists every plan with its assignment count, latest start first
pub async fn list_meal_plans(repository: &dyn RecipeRepository) -> AppResult<MealPlanList> {
    let plans = repository.list_meal_plans().await?;
    let assignments = repository.list_assignments().await?;

    let mut assigned: HashMap<Uuid, usize> = HashMap::new();
    for assignment in &assignments {
        *assigned.entry(assignment.meal_plan_id).or_default() += 1;
    }

    let meal_plans: Vec<MealPlanSummary> = plans
        .into_iter()
        .map(|plan| MealPlanSummary {
            total_days: plan.total_days(),
            recipes_assigned: assigned.get(&plan.id).copied().unwrap_or(0),
            plan,
        })
        .collect();

    Ok(MealPlanList {
        total_meal_plans: meal_plans.len(),
        meal_plans,
    })
}

/// Lays a plan out day by day, empty days included
pub async fn get_meal_plan(
    repository: &dyn RecipeRepository,
    meal_plan_id: Uuid,
) -> AppResult<MealPlanDetail> {
    let plan = find_plan(repository, meal_plan_id).await?;
    let assignments = repository.list_plan_assignments(meal_plan_id).await?;

    let recipes: HashMap<Uuid, PlannedRecipe> = if assignments.is_empty() {
        HashMap::new()
    } else {
        repository
            .list_recipes()
            .await?
            .iter()
            .map(|recipe| (recipe.id, PlannedRecipe::from(recipe)))
            .collect()
    };

    let by_day: HashMap<NaiveDate, Uuid> = assignments
        .iter()
        .map(|assignment| (assignment.day, assignment.recipe_id))
        .collect();

    let days = plan
        .days()
        .map(|date| PlanDay {
            date,
            day_of_week: date.format("%A").to_string(),
            recipe: by_day
                .get(&date)
                .and_then(|recipe_id| recipes.get(recipe_id))
                .cloned(),
        })
        .collect();

    Ok(MealPlanDetail {
        total_days: plan.total_days(),
        recipes_assigned: assignments.len(),
        days,
        plan,
    })
}

/// Puts a recipe on one day of a plan, replacing any recipe already there
pub async fn assign_recipe(
    repository: &dyn RecipeRepository,
    meal_plan_id: Uuid,
    request: AssignRecipeRequest,
) -> AppResult<MealPlanDetail> {
    let plan = find_plan(repository, meal_plan_id).await?;

    if !plan.contains(request.day) {
        return Err(AppError::InvalidInput(format!(
            "Day must be between {} and {}",
            plan.start_date, plan.end_date
        )));
    }

    if repository.find_recipe(request.recipe_id).await?.is_none() {
        return Err(recipe_not_found(request.recipe_id));
    }

    let replaced = repository
        .assign_recipe(&Assignment {
            meal_plan_id,
            recipe_id: request.recipe_id,
            day: request.day,
        })
        .await?;

    tracing::info!(
        meal_plan_id = %meal_plan_id,
        recipe_id = %request.recipe_id,
        day = %request.day,
        replaced,
        "Recipe assigned to meal plan"
    );

    get_meal_plan(repository, meal_plan_id).await
}

/// Clears one day of a plan
pub async fn remove_recipe(
    repository: &dyn RecipeRepository,
    meal_plan_id: Uuid,
    day: NaiveDate,
) -> AppResult<()> {
    find_plan(repository, meal_plan_id).await?;

    if !repository.unassign_day(meal_plan_id, day).await? {
        return Err(AppError::NotFound(format!(
            "No recipe assigned to {}",
            day
        )));
    }

    tracing::info!(meal_plan_id = %meal_plan_id, day = %day, "Recipe removed from meal plan");
    Ok(())
}

async fn find_plan(repository: &dyn RecipeRepository, meal_plan_id: Uuid) -> AppResult<MealPlan> {
    repository
        .find_meal_plan(meal_plan_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Meal plan with ID {} not found", meal_plan_id)))
}
